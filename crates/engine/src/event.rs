use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitledger_core::{GroupId, MemberId, Money};
use splitledger_events::Event;

/// Structured notifications emitted by the engine.
///
/// Observational only: consumed by UIs and logs, never required for
/// correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    GroupCreated {
        id: GroupId,
        creator: MemberId,
        members: Vec<MemberId>,
        occurred_at: DateTime<Utc>,
    },
    MemberAdded {
        group_id: GroupId,
        member: MemberId,
        occurred_at: DateTime<Utc>,
    },
    ExpenseAdded {
        group_id: GroupId,
        index: u64,
        payer: MemberId,
        amount: Money,
        occurred_at: DateTime<Utc>,
    },
    Settled {
        group_id: GroupId,
        from: MemberId,
        to: MemberId,
        amount: Money,
        occurred_at: DateTime<Utc>,
    },
    GroupSettled {
        group_id: GroupId,
        transfer_count: u64,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::GroupCreated { .. } => "groups.group.created",
            LedgerEvent::MemberAdded { .. } => "groups.member.added",
            LedgerEvent::ExpenseAdded { .. } => "expenses.expense.added",
            LedgerEvent::Settled { .. } => "settlement.debt.settled",
            LedgerEvent::GroupSettled { .. } => "settlement.group.settled",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::GroupCreated { occurred_at, .. }
            | LedgerEvent::MemberAdded { occurred_at, .. }
            | LedgerEvent::ExpenseAdded { occurred_at, .. }
            | LedgerEvent::Settled { occurred_at, .. }
            | LedgerEvent::GroupSettled { occurred_at, .. } => *occurred_at,
        }
    }
}
