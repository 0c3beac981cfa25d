//! Subscription system for live list updates.
//!
//! Every mutation of the list publishes one change event to every
//! active subscription. Each subscription has its own bounded queue, so
//! subscribers never compete for the same event and a slow subscriber
//! only ever loses its own stream:
//! - Bounded buffers with slow-subscriber dropping
//! - Immediate wake on caller cancellation
//! - Per-session delivery loops that hold no lock while delivering
//!
//! # Example
//!
//! ```ignore
//! let manager = SubscriptionManager::new();
//! let handle = manager.subscribe(SubscriptionConfig::default());
//!
//! // Receive events
//! loop {
//!     match handle.recv() {
//!         Ok(StreamEvent::Change { event }) => println!("change: {:?}", event),
//!         Ok(StreamEvent::Closed { reason }) => break,
//!         Err(_) => break,
//!     }
//! }
//! ```

mod manager;
mod session;
mod types;

pub use manager::SubscriptionManager;
pub use session::{cancel_pair, run_session, CancelSignal, CancelToken, EventSink, SessionEnd};
pub use types::{
    CloseReason, StreamEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};
