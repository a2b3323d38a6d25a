//! Replayable value holder.

use std::sync::Arc;

use tokio::sync::watch;

/// A value observers can read and subscribe to.
///
/// New subscribers immediately see the latest value. Intermediate values
/// may be coalesced for slow observers; only the most recent is kept.
#[derive(Debug)]
pub struct Observable<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replace the value and notify subscribers.
    ///
    /// Succeeds even when nobody is subscribed.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Modify the value in place and notify subscribers.
    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.sender.send_modify(modify);
    }

    /// Modify the value in place, notifying subscribers only when `modify`
    /// returns `true`. Runs under the channel's write lock.
    pub fn update_if(&self, modify: impl FnOnce(&mut T) -> bool) -> bool {
        self.sender.send_if_modified(modify)
    }

    /// Receiver whose first `borrow()` yields the current value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
