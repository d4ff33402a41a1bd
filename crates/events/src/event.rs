use chrono::{DateTime, Utc};

/// A domain-agnostic notification event.
///
/// Events are immutable facts: once emitted they are never revised.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "expenses.expense.added").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
