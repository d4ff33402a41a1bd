//! Engine facade: operation dispatch, logging, notifications.

use chrono::Utc;

use splitledger_core::{GroupId, LedgerResult, MemberId, Money};
use splitledger_events::{EventBus, InMemoryBus, Subscription};
use splitledger_expenses::{Expense, ExpenseLedger, NewExpense};
use splitledger_groups::{Group, GroupRegistry};
use splitledger_settlement::{PaymentRail, SettlementExecutor, Transfer, settlement_plan};

use crate::event::LedgerEvent;

/// One self-contained ledger engine instance.
///
/// All mutating operations take `&mut self`, so calls against one instance
/// are serialized by construction; independent instances (and therefore
/// independent group universes) share nothing and may run in parallel.
/// Every mutating operation either fully completes or leaves no trace.
pub struct LedgerEngine<R: PaymentRail> {
    registry: GroupRegistry,
    ledger: ExpenseLedger,
    executor: SettlementExecutor<R>,
    bus: InMemoryBus<LedgerEvent>,
}

impl<R: PaymentRail> LedgerEngine<R> {
    /// Builds an engine owned by `owner`, with `executor_identity`
    /// registered once and for all as the only identity allowed to write
    /// settlement balances back.
    pub fn new(owner: MemberId, executor_identity: MemberId, rail: R) -> LedgerResult<Self> {
        let mut ledger = ExpenseLedger::new(owner);
        ledger.set_settlement_authority(owner, executor_identity)?;
        Ok(Self {
            registry: GroupRegistry::new(),
            ledger,
            executor: SettlementExecutor::new(executor_identity, rail),
            bus: InMemoryBus::new(),
        })
    }

    /// Subscribes to the engine's notification stream.
    pub fn subscribe(&self) -> Subscription<LedgerEvent> {
        self.bus.subscribe()
    }

    // ---- groups ----

    pub fn create_group(
        &mut self,
        caller: MemberId,
        initial_members: &[MemberId],
    ) -> LedgerResult<GroupId> {
        let id = self.registry.create_group(caller, initial_members)?;
        let members = self.registry.members(id)?.to_vec();
        tracing::info!(group = %id, creator = %caller, members = members.len(), "group created");
        self.emit(LedgerEvent::GroupCreated {
            id,
            creator: caller,
            members,
            occurred_at: Utc::now(),
        });
        Ok(id)
    }

    pub fn add_member(
        &mut self,
        group_id: GroupId,
        caller: MemberId,
        new_member: MemberId,
    ) -> LedgerResult<()> {
        self.registry.add_member(group_id, caller, new_member)?;
        tracing::info!(group = %group_id, member = %new_member, "member added");
        self.emit(LedgerEvent::MemberAdded {
            group_id,
            member: new_member,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    pub fn group(&self, group_id: GroupId) -> LedgerResult<&Group> {
        self.registry.group(group_id)
    }

    pub fn members(&self, group_id: GroupId) -> LedgerResult<&[MemberId]> {
        self.registry.members(group_id)
    }

    pub fn is_member(&self, group_id: GroupId, who: MemberId) -> LedgerResult<bool> {
        self.registry.is_member(group_id, who)
    }

    pub fn group_count(&self) -> u64 {
        self.registry.group_count()
    }

    // ---- expenses & balances ----

    pub fn add_expense(
        &mut self,
        group_id: GroupId,
        caller: MemberId,
        input: NewExpense,
    ) -> LedgerResult<u64> {
        let amount = input.amount;
        let index = self
            .ledger
            .add_expense(&self.registry, group_id, caller, input)?;
        tracing::info!(group = %group_id, index, payer = %caller, %amount, "expense added");
        self.emit(LedgerEvent::ExpenseAdded {
            group_id,
            index,
            payer: caller,
            amount,
            occurred_at: Utc::now(),
        });
        Ok(index)
    }

    pub fn expense(&self, group_id: GroupId, index: u64) -> LedgerResult<&Expense> {
        self.ledger.expense(group_id, index)
    }

    pub fn expense_count(&self, group_id: GroupId) -> u64 {
        self.ledger.expense_count(group_id)
    }

    pub fn balance(&self, group_id: GroupId, member: MemberId) -> Money {
        self.ledger.balance(group_id, member)
    }

    pub fn balances(&self, group_id: GroupId) -> LedgerResult<Vec<(MemberId, Money)>> {
        self.ledger.balances(&self.registry, group_id)
    }

    // ---- settlement ----

    /// Suggested transfer plan for the group's current balance snapshot.
    pub fn settlement_plan(&self, group_id: GroupId) -> LedgerResult<Vec<Transfer>> {
        let snapshot = self.balances(group_id)?;
        let members: Vec<MemberId> = snapshot.iter().map(|(m, _)| *m).collect();
        let balances: Vec<Money> = snapshot.iter().map(|(_, b)| *b).collect();
        Ok(settlement_plan(&members, &balances))
    }

    /// Whether every balance in the group is zero. Always recomputed from
    /// the snapshot, never cached.
    pub fn is_settled(&self, group_id: GroupId) -> LedgerResult<bool> {
        Ok(self.balances(group_id)?.iter().all(|(_, b)| b.is_zero()))
    }

    pub fn settle_with(
        &mut self,
        group_id: GroupId,
        caller: MemberId,
        to: MemberId,
        amount: Money,
    ) -> LedgerResult<()> {
        self.executor
            .settle_with(&self.registry, &mut self.ledger, group_id, caller, to, amount)?;
        tracing::info!(group = %group_id, from = %caller, %to, %amount, "debt settled");
        self.emit(LedgerEvent::Settled {
            group_id,
            from: caller,
            to,
            amount,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    pub fn settle_all(&mut self, group_id: GroupId) -> LedgerResult<Vec<Transfer>> {
        let applied = self
            .executor
            .settle_all(&self.registry, &mut self.ledger, group_id)?;
        tracing::info!(group = %group_id, transfers = applied.len(), "group settled");
        let occurred_at = Utc::now();
        for transfer in &applied {
            self.emit(LedgerEvent::Settled {
                group_id,
                from: transfer.from,
                to: transfer.to,
                amount: transfer.amount,
                occurred_at,
            });
        }
        self.emit(LedgerEvent::GroupSettled {
            group_id,
            transfer_count: applied.len() as u64,
            occurred_at,
        });
        Ok(applied)
    }

    // ---- collaborators ----

    pub fn rail(&self) -> &R {
        self.executor.rail()
    }

    pub fn rail_mut(&mut self) -> &mut R {
        self.executor.rail_mut()
    }

    pub fn executor_identity(&self) -> MemberId {
        self.executor.identity()
    }

    /// Notifications are observational; a failing bus never fails the
    /// operation that produced the event.
    fn emit(&self, event: LedgerEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(%err, "dropped notification event");
        }
    }
}
