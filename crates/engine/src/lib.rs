//! `splitledger-engine` — the assembled group ledger & settlement engine.
//!
//! Wires one [`splitledger_groups::GroupRegistry`], one
//! [`splitledger_expenses::ExpenseLedger`], one
//! [`splitledger_settlement::SettlementExecutor`] and one notification bus
//! into a single engine instance. Instances are fully independent: tests
//! (and hosts) construct as many as they like with no shared globals.

pub mod engine;
pub mod event;

pub use engine::LedgerEngine;
pub use event::LedgerEvent;
