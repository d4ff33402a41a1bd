//! `splitledger-expenses` — expense records and per-member balances.

pub mod expense;
pub mod ledger;

pub use expense::{Category, Expense, NewExpense, Split};
pub use ledger::ExpenseLedger;
