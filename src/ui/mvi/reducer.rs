//! State transition function.

use super::intent::Intent;
use super::state::UiState;

/// Pure `(State, Intent) -> State` transition for one screen.
///
/// A [`Store`](super::Store) is the only caller. For screens backed by a
/// remote call the transitions are `Started -> Loading`,
/// `Loaded -> Success` and `Failed -> Error`, regardless of the previous
/// state, so the latest action always decides what is shown.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Must not block or touch the network; the store calls it under the
    /// state's write lock.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
