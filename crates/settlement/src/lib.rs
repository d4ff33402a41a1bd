//! `splitledger-settlement` — debt netting and authorized settlement.
//!
//! [`plan::settlement_plan`] is a pure function over a balance snapshot; it
//! has no engine dependency and can run anywhere (client or server). The
//! [`executor::SettlementExecutor`] is the stateful side: it moves real
//! value over a [`rail::PaymentRail`] and writes reduced balances back into
//! the expense ledger.

pub mod executor;
pub mod in_memory_rail;
pub mod plan;
pub mod rail;

pub use executor::SettlementExecutor;
pub use in_memory_rail::InMemoryRail;
pub use plan::{Transfer, settlement_plan};
pub use rail::{PaymentRail, RailError};
