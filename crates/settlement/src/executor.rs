//! Settlement executor: authorized real-value transfers with balance
//! write-back.

use std::collections::HashMap;

use splitledger_core::{GroupId, LedgerError, LedgerResult, MemberId, Money};
use splitledger_expenses::ExpenseLedger;
use splitledger_groups::GroupRegistry;

use crate::plan::{Transfer, settlement_plan};
use crate::rail::PaymentRail;

/// Applies settlements: moves value over the payment rail, then reduces
/// balances through the ledger's privileged `reset_balance` path.
///
/// The executor's `identity` must be registered as the ledger's settlement
/// authority; it holds no persistent state of its own beyond the rail
/// handle.
#[derive(Debug)]
pub struct SettlementExecutor<R: PaymentRail> {
    identity: MemberId,
    rail: R,
}

impl<R: PaymentRail> SettlementExecutor<R> {
    pub fn new(identity: MemberId, rail: R) -> Self {
        Self { identity, rail }
    }

    pub fn identity(&self) -> MemberId {
        self.identity
    }

    pub fn rail(&self) -> &R {
        &self.rail
    }

    pub fn rail_mut(&mut self) -> &mut R {
        &mut self.rail
    }

    /// Settles `amount` of `caller`'s debt by paying `to`.
    ///
    /// Value moves first; balances are only written once the rail confirms,
    /// and both parties move toward zero by exactly `amount`, preserving the
    /// group's zero-sum invariant. Partial settlement (`amount` below the
    /// full debt) is allowed.
    pub fn settle_with(
        &mut self,
        registry: &GroupRegistry,
        ledger: &mut ExpenseLedger,
        group_id: GroupId,
        caller: MemberId,
        to: MemberId,
        amount: Money,
    ) -> LedgerResult<()> {
        let group = registry.group(group_id)?;
        if !group.is_member(caller) || !group.is_member(to) {
            return Err(LedgerError::NotMember);
        }
        if !amount.is_positive() {
            return Err(LedgerError::invalid_amount("settlement amount must be positive"));
        }
        self.ensure_authority(ledger)?;

        let balance = ledger.balance(group_id, caller);
        if !balance.is_negative() {
            return Err(LedgerError::NoDebt);
        }
        if amount > balance.checked_neg()? {
            return Err(LedgerError::ExceedsDebt);
        }

        self.rail
            .transfer(caller, to, amount)
            .map_err(|e| LedgerError::transfer_failed(e.to_string()))?;

        tracing::debug!(%group_id, from = %caller, %to, %amount, "settled debt");
        ledger.reset_balance(self.identity, group_id, caller, amount)?;
        ledger.reset_balance(self.identity, group_id, to, amount.checked_neg()?)?;
        Ok(())
    }

    /// Computes the group's settlement plan and applies every transfer as a
    /// single atomic batch.
    ///
    /// Authorizations are preflighted per debtor so the common failure mode
    /// (a debtor who never approved the executor) aborts before any value
    /// moves. Balance deltas are committed only after the whole batch of
    /// rail transfers succeeded: a mid-batch failure leaves every balance
    /// exactly as it was. Returns the applied transfers.
    pub fn settle_all(
        &mut self,
        registry: &GroupRegistry,
        ledger: &mut ExpenseLedger,
        group_id: GroupId,
    ) -> LedgerResult<Vec<Transfer>> {
        let snapshot = ledger.balances(registry, group_id)?;
        let members: Vec<MemberId> = snapshot.iter().map(|(m, _)| *m).collect();
        let balances: Vec<Money> = snapshot.iter().map(|(_, b)| *b).collect();

        let plan = settlement_plan(&members, &balances);
        if plan.is_empty() {
            return Ok(plan);
        }
        self.ensure_authority(ledger)?;

        let mut owed_totals: HashMap<MemberId, Money> = HashMap::new();
        for transfer in &plan {
            let total = owed_totals.entry(transfer.from).or_insert(Money::ZERO);
            *total = total.checked_add(transfer.amount)?;
        }
        for (&debtor, &needed) in &owed_totals {
            let granted = self.rail.authorized_amount(debtor, self.identity);
            if granted < needed {
                return Err(LedgerError::transfer_failed(format!(
                    "{debtor} authorized {granted}, plan needs {needed}"
                )));
            }
        }

        for transfer in &plan {
            self.rail
                .transfer(transfer.from, transfer.to, transfer.amount)
                .map_err(|e| LedgerError::transfer_failed(e.to_string()))?;
        }

        // All value moved; now write every balance back.
        for transfer in &plan {
            ledger.reset_balance(self.identity, group_id, transfer.from, transfer.amount)?;
            ledger.reset_balance(
                self.identity,
                group_id,
                transfer.to,
                transfer.amount.checked_neg()?,
            )?;
        }

        tracing::debug!(%group_id, transfers = plan.len(), "group fully settled");
        Ok(plan)
    }

    fn ensure_authority(&self, ledger: &ExpenseLedger) -> LedgerResult<()> {
        if ledger.settlement_authority() != Some(self.identity) {
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }
}
