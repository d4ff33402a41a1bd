//! `splitledger-core` — shared primitives of the ledger engine.
//!
//! This crate contains **pure domain** primitives (identities, exact money,
//! the error taxonomy). It owns no engine state.

pub mod error;
pub mod id;
pub mod money;

pub use error::{LedgerError, LedgerResult};
pub use id::{GroupId, MemberId};
pub use money::Money;
