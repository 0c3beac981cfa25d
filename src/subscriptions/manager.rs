//! Subscription registry and event broadcast.

use crate::types::ChangeEvent;
use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

use super::types::{
    CloseReason, StreamEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};

/// Internal subscription state.
struct Subscription {
    sender: Sender<StreamEvent>,
}

impl Subscription {
    /// Try to send an event. Returns false if the buffer is full or the
    /// receiver is gone (subscriber will be dropped).
    fn try_send(&self, event: StreamEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }
}

/// Manages subscriptions and broadcasts change events.
///
/// Every subscription gets its own bounded queue; `publish` fans each
/// event out to all of them, so no two subscribers ever compete for the
/// same delivery. `try_send` never blocks, which lets `TaskList` publish
/// while holding its store lock without stalling on a slow sink.
///
/// Callers that need a single total order across subscribers must
/// serialize their `publish` calls; `TaskList` does so under its store
/// lock.
pub struct SubscriptionManager {
    /// Active subscriptions by id.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,

    /// Counter for generating subscription ids.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new subscription.
    ///
    /// The returned handle receives every event published after this
    /// call returns; nothing published earlier is replayed.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size);

        self.subscriptions
            .write()
            .insert(id, Subscription { sender });
        trace!(id = id.0, "subscriber registered");

        SubscriptionHandle { id, receiver }
    }

    /// Remove a subscription and wake its receiver.
    ///
    /// Dropping the sender disconnects the channel, so a receiver
    /// blocked in `recv` returns immediately.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            // Best effort; the receiver may already be gone.
            let _ = sub.sender.try_send(StreamEvent::Closed {
                reason: CloseReason::Unsubscribed,
            });
            trace!(id = id.0, "subscriber removed");
        }
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Fan one event out to every active subscription.
    ///
    /// Subscriptions whose buffer is full or whose receiver is gone are
    /// swept from the registry in the same call, so a dead session is
    /// never woken again.
    pub fn publish(&self, event: &ChangeEvent) {
        let mut dead = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if !sub.try_send(StreamEvent::Change {
                    event: event.clone(),
                }) {
                    dead.push(*id);
                }
            }
        }

        if !dead.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in dead {
                if let Some(sub) = subs.remove(&id) {
                    // Might not fit if the buffer is still full; the
                    // disconnect itself tells the receiver it is done.
                    let _ = sub.sender.try_send(StreamEvent::Closed {
                        reason: CloseReason::BufferOverflow,
                    });
                    debug!(id = id.0, "dropped slow subscriber");
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
