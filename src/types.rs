//! Core types for the task list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a task item.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion state of a task item.
///
/// The store never branches on the variant; it only carries it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Done,
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// A single task item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (assigned by store).
    pub id: ItemId,

    /// Human-readable description.
    pub description: String,

    /// Current completion state.
    pub status: Status,
}

/// An immutable record of one mutation, used to drive subscriber
/// notifications.
///
/// Exactly one event is produced per successful mutation, in the same
/// order the mutations were applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// An item was added to the list.
    Added { item: Item },

    /// An item's status was updated in place.
    Updated { item: Item },

    /// An item was removed from the list.
    Removed { id: ItemId },
}

impl ChangeEvent {
    /// The id of the item this event is about.
    pub fn item_id(&self) -> ItemId {
        match self {
            ChangeEvent::Added { item } | ChangeEvent::Updated { item } => item.id,
            ChangeEvent::Removed { id } => *id,
        }
    }
}
