//! Payment-rail collaborator boundary.

use thiserror::Error;

use splitledger_core::{MemberId, Money};

/// Failure surfaced by the payment rail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RailError {
    #[error("insufficient funds: {from} holds {held}, needs {needed}")]
    InsufficientFunds {
        from: MemberId,
        held: Money,
        needed: Money,
    },

    #[error("insufficient authorization: {from} granted {granted}, needs {needed}")]
    InsufficientAuthorization {
        from: MemberId,
        granted: Money,
        needed: Money,
    },

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// External component that actually moves value between members.
///
/// The engine consumes this interface, it does not own it. Transfers use a
/// pre-authorized pull semantic: `from` must have granted the executor
/// permission to move at least `amount` beforehand; how that grant happens
/// is the rail's business. This call can fail or time out, so the engine
/// never mutates a balance before it returns success.
pub trait PaymentRail {
    /// Pull `amount` from `from` and deliver it to `to`.
    fn transfer(&mut self, from: MemberId, to: MemberId, amount: Money) -> Result<(), RailError>;

    /// How much `from` has pre-authorized `spender` to pull.
    fn authorized_amount(&self, from: MemberId, spender: MemberId) -> Money;
}
