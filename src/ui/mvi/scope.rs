//! Lifetime of a screen's background work.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Owner of a screen's in-flight work.
///
/// Closing the scope (explicitly or by dropping it) cancels every task
/// launched through it. Stores holding a [`ScopeHandle`] stop publishing
/// state once the scope is closed.
pub struct ScreenScope {
    handle: ScopeHandle,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self {
            handle: ScopeHandle {
                closed: Arc::new(AtomicBool::new(false)),
                notify: Arc::new(Notify::new()),
            },
        }
    }

    /// Create a handle for sharing with tasks and stores.
    pub fn handle(&self) -> ScopeHandle {
        self.handle.clone()
    }

    /// Spawn `work` on the tokio runtime, bound to this scope.
    ///
    /// The returned handle completes when the work finishes or the scope
    /// closes, whichever happens first.
    pub fn launch<F>(&self, work: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = self.handle();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = handle.closed() => {
                    tracing::debug!("Screen work cancelled");
                }
                _ = work => {}
            }
        })
    }

    pub fn close(&self) {
        self.handle.close();
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.handle.close();
    }
}

/// Lightweight handle for checking scope state.
#[derive(Clone)]
pub struct ScopeHandle {
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ScopeHandle {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    /// Resolve once the scope is closed.
    pub async fn closed(&self) {
        // Subscribe to Notify BEFORE checking the flag so a close() between
        // the check and the await is not lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_closed() {
            return;
        }
        notified.await;
    }
}
