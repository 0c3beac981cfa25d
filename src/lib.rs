//! # Taskfeed
//!
//! An in-memory, multi-client task list with live change subscriptions.
//!
//! ## Core Concepts
//!
//! - **Items**: task records with a store-assigned, strictly increasing id
//! - **Change events**: one immutable event per successful mutation, in
//!   mutation order
//! - **Subscriptions**: per-subscriber bounded queues fed by every
//!   mutation; slow subscribers are dropped, not waited on
//!
//! ## Example
//!
//! ```ignore
//! use taskfeed::{Status, TaskList};
//!
//! let list = TaskList::new();
//! let handle = list.subscribe();
//!
//! let item = list.add_item("buy milk");
//! list.update_status(item.id, Status::Done)?;
//!
//! while let Ok(event) = handle.recv() {
//!     println!("change: {:?}", event);
//! }
//! ```

pub mod error;
pub mod list;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{Result, TaskError};
pub use list::TaskList;
pub use store::ItemStore;
pub use subscriptions::{
    cancel_pair, run_session, CancelSignal, CancelToken, CloseReason, EventSink, SessionEnd,
    StreamEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
pub use types::{ChangeEvent, Item, ItemId, Status};
