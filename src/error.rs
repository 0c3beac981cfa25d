//! Error types for the task list.

use crate::types::ItemId;
use thiserror::Error;

/// Main error type for task list operations.
///
/// Sink failures and cancellation are session outcomes, not errors; see
/// `subscriptions::SessionEnd`.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
}

/// Result type for task list operations.
pub type Result<T> = std::result::Result<T, TaskError>;
