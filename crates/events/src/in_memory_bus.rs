//! In-memory event bus for tests and single-process hosts.

use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};

use crate::bus::{EventBus, PublishError, Subscription};

/// Best-effort in-memory fan-out.
///
/// - No IO, no async.
/// - Disconnected subscribers are dropped on the next publish.
#[derive(Debug, Default)]
pub struct InMemoryBus<M> {
    subscribers: Mutex<Vec<Sender<M>>>,
}

impl<M> InMemoryBus<M> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M: Clone + Send> EventBus<M> for InMemoryBus<M> {
    fn publish(&self, message: M) -> Result<(), PublishError> {
        let mut subscribers = self.subscribers.lock().map_err(|_| PublishError::Poisoned)?;
        subscribers.retain(|sender| sender.send(message.clone()).is_ok());
        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (sender, receiver) = mpsc::channel();
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(sender),
            // A poisoned bus yields a subscription that never receives.
            Err(_) => drop(sender),
        }
        Subscription::new(receiver)
    }
}
