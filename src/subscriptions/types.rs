//! Subscription types for live list updates.

use crate::types::ChangeEvent;
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping the subscriber.
    /// Default: 1000
    pub buffer_size: usize,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self { buffer_size: 1000 }
    }
}

/// What a subscriber receives on its channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// A list mutation.
    Change { event: ChangeEvent },

    /// The subscription was closed by the registry.
    Closed { reason: CloseReason },
}

/// Why a subscription was closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,

    /// Explicitly unsubscribed.
    Unsubscribed,

    /// The registry went away without sending a close event.
    Disconnected,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to a live subscription.
///
/// Events published before the handle was created are never replayed;
/// the stream starts at the next mutation.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,

    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<StreamEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<StreamEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<StreamEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<StreamEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Blocking iterator over events until the channel disconnects.
    pub fn iter(&self) -> impl Iterator<Item = StreamEvent> + '_ {
        self.receiver.iter()
    }
}
