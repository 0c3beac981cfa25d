//! Subscriber session delivery loop.

use crossbeam_channel::{bounded, select, Receiver, Sender, TryRecvError};
use tracing::debug;

use super::manager::SubscriptionManager;
use super::types::{CloseReason, StreamEvent, SubscriptionHandle};
use crate::types::ChangeEvent;

/// Delivery channel for one subscriber session.
///
/// Implementations report failure by returning `false`; the session
/// terminates and deregisters itself, leaving every other session
/// untouched. A sink that blocks stalls only its own session: no list
/// or registry lock is held during delivery.
pub trait EventSink {
    /// Deliver one event. Returns false if the channel rejected the
    /// write.
    fn deliver(&mut self, event: ChangeEvent) -> bool;
}

impl<F> EventSink for F
where
    F: FnMut(ChangeEvent) -> bool,
{
    fn deliver(&mut self, event: ChangeEvent) -> bool {
        self(event)
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The caller cancelled the subscription.
    Cancelled,

    /// The sink rejected a write.
    SinkFailed,

    /// The registry closed the subscription.
    Closed(CloseReason),
}

/// Caller-side handle that cancels a session.
///
/// Cancelling, or simply dropping the token, unblocks the session's
/// wait immediately rather than at the next publish.
pub struct CancelToken {
    _sender: Sender<()>,
}

impl CancelToken {
    /// Cancel the paired session.
    pub fn cancel(self) {}
}

/// Session-side half of a cancellation pair.
pub struct CancelSignal {
    receiver: Receiver<()>,
}

impl CancelSignal {
    fn is_cancelled(&self) -> bool {
        // The token never sends; the only observable transition is the
        // channel disconnecting when it is dropped.
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }
}

/// Create a linked cancellation token and signal.
pub fn cancel_pair() -> (CancelToken, CancelSignal) {
    let (sender, receiver) = bounded(0);
    (CancelToken { _sender: sender }, CancelSignal { receiver })
}

/// Drive one subscriber session to completion.
///
/// Blocks in the caller's own execution context until the caller
/// cancels, the sink fails, or the registry closes the subscription.
/// On cancellation and sink failure the session deregisters itself so
/// it is never woken again.
pub fn run_session<S: EventSink>(
    manager: &SubscriptionManager,
    handle: SubscriptionHandle,
    cancel: CancelSignal,
    sink: &mut S,
) -> SessionEnd {
    let events = &handle.receiver;
    let cancelled = &cancel.receiver;

    loop {
        // Observe cancellation ahead of any queued events.
        if cancel.is_cancelled() {
            manager.unsubscribe(handle.id);
            return SessionEnd::Cancelled;
        }

        select! {
            recv(cancelled) -> _ => {
                manager.unsubscribe(handle.id);
                return SessionEnd::Cancelled;
            }
            recv(events) -> msg => match msg {
                Ok(StreamEvent::Change { event }) => {
                    if !sink.deliver(event) {
                        debug!(id = handle.id.0, "sink rejected write, closing session");
                        manager.unsubscribe(handle.id);
                        return SessionEnd::SinkFailed;
                    }
                }
                Ok(StreamEvent::Closed { reason }) => return SessionEnd::Closed(reason),
                Err(_) => return SessionEnd::Closed(CloseReason::Disconnected),
            },
        }
    }
}
