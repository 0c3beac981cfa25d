//! Ordered item collection with monotonic id assignment.

use crate::error::{Result, TaskError};
use crate::types::{Item, ItemId, Status};

/// Owns the ordered collection of task items and the id counter.
///
/// Has no concurrency awareness of its own: `TaskList` guards every
/// access with its lock. Items keep insertion order and ids are never
/// reused, even after a delete.
#[derive(Debug)]
pub struct ItemStore {
    /// Items in insertion order.
    items: Vec<Item>,

    /// Next id to assign. Ids start at 1.
    next_id: u64,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a new item with `Pending` status.
    ///
    /// Always succeeds; advances the id counter.
    pub fn add(&mut self, description: impl Into<String>) -> Item {
        let item = Item {
            id: ItemId(self.next_id),
            description: description.into(),
            status: Status::Pending,
        };
        self.next_id += 1;
        self.items.push(item.clone());
        item
    }

    /// Set the status of an existing item in place.
    ///
    /// Returns the item after mutation.
    pub fn update_status(&mut self, id: ItemId, status: Status) -> Result<Item> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(TaskError::ItemNotFound(id))?;
        item.status = status;
        Ok(item.clone())
    }

    /// Remove an item from the collection.
    pub fn remove(&mut self, id: ItemId) -> Result<ItemId> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TaskError::ItemNotFound(id))?;
        self.items.remove(index);
        Ok(id)
    }

    /// Copy of the current collection in insertion order.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
