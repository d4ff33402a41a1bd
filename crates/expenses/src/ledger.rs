//! Expense ledger: exclusive owner of expense records and balance
//! accumulators.
//!
//! Balances are lazily created at zero and never deleted; "settled" simply
//! means every balance in the group is back at zero. The central invariant
//! is that per group, the balances of all members sum to exactly zero after
//! every operation.

use std::collections::HashMap;

use splitledger_core::{GroupId, LedgerError, LedgerResult, MemberId, Money};
use splitledger_groups::GroupRegistry;

use crate::expense::{Expense, NewExpense};

/// Per-group expense records plus per-(group, member) net balances.
///
/// Positive balance: the group owes this member. Negative: this member owes
/// the group. Balance mutation happens on two paths only: appending an
/// expense, and [`ExpenseLedger::reset_balance`] from the configured
/// settlement authority.
#[derive(Debug)]
pub struct ExpenseLedger {
    owner: MemberId,
    settlement_authority: Option<MemberId>,
    expenses: HashMap<GroupId, Vec<Expense>>,
    balances: HashMap<(GroupId, MemberId), Money>,
}

impl ExpenseLedger {
    pub fn new(owner: MemberId) -> Self {
        Self {
            owner,
            settlement_authority: None,
            expenses: HashMap::new(),
            balances: HashMap::new(),
        }
    }

    /// Configures the one identity allowed to call [`Self::reset_balance`].
    ///
    /// Owner-only and set-once, so the balance-mutation capability is a
    /// static, auditable fact of the ledger instance.
    pub fn set_settlement_authority(
        &mut self,
        caller: MemberId,
        authority: MemberId,
    ) -> LedgerResult<()> {
        if caller != self.owner {
            return Err(LedgerError::Unauthorized);
        }
        if authority.is_zero() {
            return Err(LedgerError::invalid_member("null settlement authority"));
        }
        if self.settlement_authority.is_some() {
            return Err(LedgerError::AuthorityAlreadySet);
        }
        self.settlement_authority = Some(authority);
        Ok(())
    }

    pub fn settlement_authority(&self) -> Option<MemberId> {
        self.settlement_authority
    }

    /// Records an expense paid by `caller` and split across `splits`.
    ///
    /// The payer's balance rises by the full amount (they advanced the
    /// funds); every split member's balance falls by their share — including
    /// the payer's own share when they appear in the splits. Returns the new
    /// expense's index.
    ///
    /// All new balance values are computed before any is written, so a
    /// failure at any step leaves the ledger untouched.
    pub fn add_expense(
        &mut self,
        registry: &GroupRegistry,
        group_id: GroupId,
        caller: MemberId,
        input: NewExpense,
    ) -> LedgerResult<u64> {
        let group = registry.group(group_id)?;
        if !group.is_member(caller) {
            return Err(LedgerError::Unauthorized);
        }
        if !input.amount.is_positive() {
            return Err(LedgerError::invalid_amount("expense amount must be positive"));
        }

        let mut split_total = Money::ZERO;
        for split in &input.splits {
            if split.amount.is_negative() {
                return Err(LedgerError::invalid_amount("split amounts must be non-negative"));
            }
            split_total = split_total.checked_add(split.amount)?;
        }
        // Exact equality, no tolerance. An empty split list fails here too.
        if split_total != input.amount {
            return Err(LedgerError::SplitMismatch);
        }
        for split in &input.splits {
            if !group.is_member(split.member) {
                return Err(LedgerError::invalid_member(format!(
                    "{} is not in group {group_id}",
                    split.member
                )));
            }
        }

        let mut staged = Vec::with_capacity(input.splits.len() + 1);
        self.stage(&mut staged, group_id, caller, input.amount)?;
        for split in &input.splits {
            self.stage(&mut staged, group_id, split.member, split.amount.checked_neg()?)?;
        }
        for (member, next) in staged {
            self.balances.insert((group_id, member), next);
        }

        let records = self.expenses.entry(group_id).or_default();
        let index = records.len() as u64;
        records.push(Expense::new(group_id, index, caller, input));
        Ok(index)
    }

    pub fn expense(&self, group_id: GroupId, index: u64) -> LedgerResult<&Expense> {
        self.expenses
            .get(&group_id)
            .and_then(|records| records.get(index as usize))
            .ok_or(LedgerError::NotFound)
    }

    /// Number of expenses recorded for the group (0 for untouched groups).
    pub fn expense_count(&self, group_id: GroupId) -> u64 {
        self.expenses
            .get(&group_id)
            .map_or(0, |records| records.len() as u64)
    }

    /// Net balance of `member` in `group_id`; zero when there has been no
    /// activity.
    pub fn balance(&self, group_id: GroupId, member: MemberId) -> Money {
        self.balances
            .get(&(group_id, member))
            .copied()
            .unwrap_or(Money::ZERO)
    }

    /// Balance snapshot over the group's full roster, in member order.
    pub fn balances(
        &self,
        registry: &GroupRegistry,
        group_id: GroupId,
    ) -> LedgerResult<Vec<(MemberId, Money)>> {
        Ok(registry
            .members(group_id)?
            .iter()
            .map(|&member| (member, self.balance(group_id, member)))
            .collect())
    }

    /// Privileged balance adjustment after a confirmed real-value transfer.
    ///
    /// Only the configured settlement authority may call this; settlement
    /// mutation stays on a distinct, auditable path from expense mutation.
    pub fn reset_balance(
        &mut self,
        caller: MemberId,
        group_id: GroupId,
        member: MemberId,
        delta: Money,
    ) -> LedgerResult<()> {
        if self.settlement_authority != Some(caller) {
            return Err(LedgerError::Unauthorized);
        }
        let next = self.balance(group_id, member).checked_add(delta)?;
        self.balances.insert((group_id, member), next);
        Ok(())
    }

    fn stage(
        &self,
        staged: &mut Vec<(MemberId, Money)>,
        group_id: GroupId,
        member: MemberId,
        delta: Money,
    ) -> LedgerResult<()> {
        if let Some(entry) = staged.iter_mut().find(|(m, _)| *m == member) {
            entry.1 = entry.1.checked_add(delta)?;
        } else {
            staged.push((member, self.balance(group_id, member).checked_add(delta)?));
        }
        Ok(())
    }
}
