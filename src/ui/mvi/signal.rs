//! One-shot events such as navigation requests.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Single-observer event channel.
///
/// Unlike [`Observable`](super::Observable), nothing is replayed: an event is
/// delivered at most once, to the current subscriber only, and is dropped
/// when no subscriber is listening. Subscribing again detaches the previous
/// receiver.
pub struct Signal<E> {
    sender: Arc<Mutex<Option<mpsc::UnboundedSender<E>>>>,
}

impl<E> Clone for Signal<E> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self {
            sender: Arc::new(Mutex::new(None)),
        }
    }
}

impl<E: Send + std::fmt::Debug + 'static> Signal<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving events emitted from now on.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<E> {
        let (sender, receiver) = mpsc::unbounded_channel();
        *self.sender.lock() = Some(sender);
        receiver
    }

    /// Deliver `event` to the live subscriber.
    ///
    /// Returns `false` when the event was dropped.
    pub fn emit(&self, event: E) -> bool {
        let mut slot = self.sender.lock();
        let Some(sender) = slot.as_ref() else {
            tracing::debug!(?event, "Signal dropped: no subscriber");
            return false;
        };

        match sender.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                tracing::debug!(?event, "Signal dropped: subscriber gone");
                *slot = None;
                false
            }
        }
    }
}
