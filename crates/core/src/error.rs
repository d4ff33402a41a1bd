//! Ledger error model.

use thiserror::Error;

/// Result type used across the engine.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Engine-level error.
///
/// Every failing operation reports one of these synchronously and leaves all
/// records and balances exactly as they were before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Unknown group id or expense index.
    #[error("not found")]
    NotFound,

    /// Caller lacks the required role (non-creator adding a member,
    /// non-authority resetting a balance, non-owner configuring the ledger).
    #[error("unauthorized")]
    Unauthorized,

    /// Caller or counterparty is not in the group.
    #[error("not a group member")]
    NotMember,

    /// Member being added is already in the group.
    #[error("already a member")]
    AlreadyMember,

    /// Null identity, or a split references someone outside the group.
    #[error("invalid member: {0}")]
    InvalidMember(String),

    /// Zero or negative amount where a positive one is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Expense splits do not sum exactly to the expense amount.
    #[error("splits must sum to total amount")]
    SplitMismatch,

    /// Settlement attempted by a member whose balance is not negative.
    #[error("sender has no debt")]
    NoDebt,

    /// Settlement amount larger than the outstanding debt.
    #[error("amount exceeds debt")]
    ExceedsDebt,

    /// A checked money operation overflowed.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// The payment rail rejected a transfer (insufficient funds or
    /// authorization, or an outright failure).
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// The settlement authority has already been configured.
    #[error("settlement authority already set")]
    AuthorityAlreadySet,
}

impl LedgerError {
    pub fn invalid_member(msg: impl Into<String>) -> Self {
        Self::InvalidMember(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn transfer_failed(msg: impl Into<String>) -> Self {
        Self::TransferFailed(msg.into())
    }
}
