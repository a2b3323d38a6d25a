use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::ApiResult;
use crate::ui::mvi::{ScreenScope, Store};

use super::errors::ErrorCatalog;
use super::intent::ScreenIntent;
use super::reducer::ScreenReducer;
use super::state::{ErrorMessage, Payload, ScreenState};

/// Presentation state holder shared by every screen.
///
/// Each user action calls [`load`](Self::load) (or
/// [`load_then`](Self::load_then)): state enters `Loading`, the call runs in
/// the screen's scope, and the outcome is projected into `Success` or
/// `Error` through the screen's [`ErrorCatalog`]. Dropping the model cancels
/// in-flight work and suppresses its state update.
///
/// Only the latest action may publish an outcome. A call that resolves after
/// a newer action started is discarded along with its `on_success`.
pub struct ScreenModel<T: Payload> {
    name: &'static str,
    store: Store<ScreenReducer<T>>,
    catalog: ErrorCatalog,
    scope: ScreenScope,
    generation: Arc<AtomicU64>,
}

impl<T: Payload> ScreenModel<T> {
    pub fn new(name: &'static str, catalog: ErrorCatalog) -> Self {
        let scope = ScreenScope::new();
        Self {
            name,
            store: Store::new(scope.handle()),
            catalog,
            scope,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> ScreenState<T> {
        self.store.current()
    }

    /// Receiver that replays the current state, then every change.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<T>> {
        self.store.subscribe()
    }

    /// Issue `call` and project its outcome.
    pub fn load<F>(&self, call: F) -> JoinHandle<()>
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        self.load_then(call, |_| {})
    }

    /// Like [`load`](Self::load), running `on_success` after the state
    /// becomes `Success`. Used for one-shot navigation signals.
    pub fn load_then<F, S>(&self, call: F, on_success: S) -> JoinHandle<()>
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
        S: FnOnce(&T) + Send + 'static,
    {
        let name = self.name;
        let catalog = self.catalog;
        let outcome = async move {
            match call.await {
                ApiResult::Success(payload) => Ok(payload),
                ApiResult::Error { code, message } => {
                    tracing::info!(screen = name, code, error = %message, "Load failed");
                    Err(catalog.resolve(code, message))
                }
            }
        };
        self.run(outcome, on_success)
    }

    /// Refuse an action before any call is issued (local validation).
    ///
    /// Goes through `Loading` to `Error` like a failed call.
    pub fn reject(&self, message: ErrorMessage) -> JoinHandle<()> {
        tracing::info!(screen = self.name, error = %message.cause, "Action rejected");
        self.run(async move { Err(message) }, |_| {})
    }

    /// Show an error that did not come from a remote call.
    pub fn fail(&self, message: ErrorMessage) {
        self.supersede();
        self.store.dispatch(ScreenIntent::Failed(message));
    }

    /// Enter `Loading` without issuing a call (e.g. an external sign-in sheet
    /// is open).
    pub fn mark_loading(&self) {
        self.supersede();
        self.store.dispatch(ScreenIntent::Started);
    }

    /// Cancel in-flight work. The state stays as it was.
    pub fn close(&self) {
        self.scope.close();
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_closed()
    }

    /// Invalidate every outcome still in flight and return the new ticket.
    fn supersede(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn run<F, S>(&self, outcome: F, on_success: S) -> JoinHandle<()>
    where
        F: Future<Output = Result<T, ErrorMessage>> + Send + 'static,
        S: FnOnce(&T) + Send + 'static,
    {
        let name = self.name;
        let store = self.store.clone();
        let generation = Arc::clone(&self.generation);
        let ticket = self.supersede();

        store.dispatch(ScreenIntent::Started);
        tracing::debug!(screen = name, "Loading");

        self.scope.launch(async move {
            let outcome = outcome.await;
            let latest = || generation.load(Ordering::SeqCst) == ticket;
            match outcome {
                Ok(payload) => {
                    if store.dispatch_when(ScreenIntent::Loaded(payload.clone()), latest) {
                        tracing::debug!(screen = name, "Loaded");
                        on_success(&payload);
                    } else {
                        tracing::debug!(screen = name, "Superseded result dropped");
                    }
                }
                Err(message) => {
                    if !store.dispatch_when(ScreenIntent::Failed(message), latest) {
                        tracing::debug!(screen = name, "Superseded failure dropped");
                    }
                }
            }
        })
    }
}
