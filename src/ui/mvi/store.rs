//! Observable state driven by a reducer.

use tokio::sync::watch;

use super::observable::Observable;
use super::reducer::Reducer;
use super::scope::ScopeHandle;

/// Holds a screen's state and applies intents through `R`.
///
/// Dispatches after the owning scope closed are discarded, so a torn-down
/// screen never receives a late update.
pub struct Store<R: Reducer> {
    state: Observable<R::State>,
    scope: ScopeHandle,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            scope: self.scope.clone(),
        }
    }
}

impl<R: Reducer> Store<R> {
    pub fn new(scope: ScopeHandle) -> Self {
        Self {
            state: Observable::new(R::State::default()),
            scope,
        }
    }

    /// Apply `intent` to the current state.
    ///
    /// Returns `false` if the scope is closed and nothing changed.
    pub fn dispatch(&self, intent: R::Intent) -> bool {
        self.dispatch_when(intent, || true)
    }

    /// Apply `intent` only if `current` still holds.
    ///
    /// The scope and `current` are checked under the state's write lock, so
    /// a close or a competing dispatch cannot slip in between check and
    /// write.
    pub fn dispatch_when(&self, intent: R::Intent, current: impl FnOnce() -> bool) -> bool {
        let scope = &self.scope;
        self.state.update_if(|state| {
            if scope.is_closed() || !current() {
                return false;
            }
            let previous = std::mem::take(state);
            *state = R::reduce(previous, intent);
            true
        })
    }

    pub fn current(&self) -> R::State {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mvi::{Intent, ScreenScope, UiState};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Count(u32);
    impl UiState for Count {}

    struct Add(u32);
    impl Intent for Add {}

    struct Adder;
    impl Reducer for Adder {
        type State = Count;
        type Intent = Add;

        fn reduce(state: Count, intent: Add) -> Count {
            Count(state.0 + intent.0)
        }
    }

    #[test]
    fn dispatch_applies_reducer() {
        let scope = ScreenScope::new();
        let store: Store<Adder> = Store::new(scope.handle());

        assert!(store.dispatch(Add(2)));
        assert!(store.dispatch(Add(3)));
        assert_eq!(store.current(), Count(5));
    }

    #[test]
    fn closed_scope_discards_dispatch() {
        let scope = ScreenScope::new();
        let store: Store<Adder> = Store::new(scope.handle());
        let mut receiver = store.subscribe();
        receiver.borrow_and_update();

        scope.close();
        assert!(!store.dispatch(Add(1)));
        assert_eq!(store.current(), Count(0));
        assert!(!receiver.has_changed().unwrap());
    }

    #[test]
    fn failed_condition_leaves_state_untouched() {
        let scope = ScreenScope::new();
        let store: Store<Adder> = Store::new(scope.handle());

        assert!(!store.dispatch_when(Add(4), || false));
        assert_eq!(store.current(), Count(0));
        assert!(store.dispatch_when(Add(4), || true));
        assert_eq!(store.current(), Count(4));
    }
}
