//! Change notifications.
//!
//! Every successful mutation publishes exactly one [`ChangeEvent`]. Views that
//! depend on a collection hold a [`Subscription`] and reload the collection
//! when an event arrives instead of trusting a cached copy. Dropping a
//! subscription (or calling [`Subscription::unsubscribe`]) ends it.

use std::fmt;

use log::{debug, warn};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use crate::models::{PlantId, TaskId};

const DEFAULT_CAPACITY: usize = 64;

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Create,
    Complete,
    Postpone,
    Delete,
    AddPlant,
    RemovePlant,
    /// Whole collection written by the caller
    Replace,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "create",
            ChangeAction::Complete => "complete",
            ChangeAction::Postpone => "postpone",
            ChangeAction::Delete => "delete",
            ChangeAction::AddPlant => "add_plant",
            ChangeAction::RemovePlant => "remove_plant",
            ChangeAction::Replace => "replace",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub user_id: String,
    pub plant_id: Option<PlantId>,
    pub task_id: Option<TaskId>,
    pub action: ChangeAction,
    /// Collection version written by the mutation
    pub version: u64,
}

/// Publish side, owned by the engine.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Delivers `event` to every live subscription and returns how many
    /// received it.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        debug!(
            "change: {} plant={:?} task={:?} v{}",
            event.action, event.plant_id, event.task_id, event.version
        );
        // An error only means nobody is listening.
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Receive side of the change stream.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    /// Waits for the next event; `None` once the engine is gone.
    ///
    /// A subscriber that fell behind skips the events it missed; it should
    /// reload the full collection anyway.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Change subscriber lagged, skipped {skipped} events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-published event, if any.
    pub fn try_recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Change subscriber lagged, skipped {skipped} events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {
        drop(self.receiver);
    }
}
