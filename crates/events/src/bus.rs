//! Event publishing/subscription abstraction.
//!
//! Intentionally lightweight: broadcast semantics, no persistence, no
//! ordering guarantees beyond what an implementation provides. Consumers
//! that care about exactness must be idempotent.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// Internal lock poisoning; the bus is unusable.
    #[error("event bus poisoned")]
    Poisoned,
}

/// A subscription to an event stream. Each subscription receives a copy of
/// every event published after it was created.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next event is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Receive without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything currently queued.
    pub fn drain(&self) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(message) = self.try_recv() {
            out.push(message);
        }
        out
    }
}

/// Pub/sub fan-out for notification events.
pub trait EventBus<M>: Send + Sync {
    fn publish(&self, message: M) -> Result<(), PublishError>;

    fn subscribe(&self) -> Subscription<M>;
}
