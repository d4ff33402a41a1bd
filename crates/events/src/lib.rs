//! Notification events and their distribution.
//!
//! The engine emits structured events for external observers (UI, logs).
//! Events are observational only: correctness never depends on delivery.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, PublishError, Subscription};
pub use event::Event;
pub use in_memory_bus::InMemoryBus;
