//! Main TaskList struct tying store and subscriptions together.

use crate::error::Result;
use crate::store::ItemStore;
use crate::subscriptions::{
    SubscriptionConfig, SubscriptionHandle, SubscriptionManager,
};
use crate::types::{ChangeEvent, Item, ItemId, Status};
use parking_lot::Mutex;
use tracing::debug;

/// Shared, in-memory task list with live change notification.
///
/// All mutations run under one lock spanning "mutate collection +
/// publish event", so every subscriber observes events in exactly the
/// order the mutations were applied. Publishing never blocks on a
/// subscriber: each subscription has its own bounded queue, and slow
/// ones are dropped rather than waited on.
///
/// Failed mutations publish nothing and leave the collection unchanged.
pub struct TaskList {
    /// Item collection, guarded for exclusive access.
    store: Mutex<ItemStore>,

    /// Subscriber registry and broadcast coordinator.
    subscriptions: SubscriptionManager,
}

impl TaskList {
    /// Create an empty task list.
    pub fn new() -> Self {
        Self {
            store: Mutex::new(ItemStore::new()),
            subscriptions: SubscriptionManager::new(),
        }
    }

    // --- Mutations ---

    /// Add a new item with `Pending` status.
    pub fn add_item(&self, description: impl Into<String>) -> Item {
        let mut store = self.store.lock();
        let item = store.add(description);
        debug!(id = %item.id, "item added");
        self.subscriptions.publish(&ChangeEvent::Added {
            item: item.clone(),
        });
        item
    }

    /// Set the status of an existing item.
    ///
    /// Returns the item after mutation.
    pub fn update_status(&self, id: ItemId, status: Status) -> Result<Item> {
        let mut store = self.store.lock();
        let item = store.update_status(id, status)?;
        self.subscriptions.publish(&ChangeEvent::Updated {
            item: item.clone(),
        });
        Ok(item)
    }

    /// Remove an item from the list.
    pub fn delete_item(&self, id: ItemId) -> Result<()> {
        let mut store = self.store.lock();
        let removed = store.remove(id)?;
        self.subscriptions
            .publish(&ChangeEvent::Removed { id: removed });
        Ok(())
    }

    // --- Reads ---

    /// Snapshot of the current items in insertion order.
    pub fn list_items(&self) -> Vec<Item> {
        self.store.lock().snapshot()
    }

    /// Number of items currently in the list.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    // --- Subscriptions ---

    /// Subscribe to the live change stream with default buffering.
    ///
    /// The stream starts at the next mutation: events published before
    /// this call are never replayed.
    pub fn subscribe(&self) -> SubscriptionHandle {
        self.subscribe_with(SubscriptionConfig::default())
    }

    /// Subscribe with explicit configuration.
    pub fn subscribe_with(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.subscriber_count()
    }

    /// The subscription registry, for driving session loops.
    pub fn subscriptions(&self) -> &SubscriptionManager {
        &self.subscriptions
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}
