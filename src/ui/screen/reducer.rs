use std::marker::PhantomData;

use crate::ui::mvi::Reducer;

use super::intent::ScreenIntent;
use super::state::{Payload, ScreenState};

/// Reducer for the generic `Nothing -> Loading -> Success|Error` cycle.
pub struct ScreenReducer<T>(PhantomData<T>);

impl<T: Payload> Reducer for ScreenReducer<T> {
    type State = ScreenState<T>;
    type Intent = ScreenIntent<T>;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ScreenIntent::Started => ScreenState::Loading,
            ScreenIntent::Loaded(payload) => ScreenState::Success(payload),
            ScreenIntent::Failed(message) => ScreenState::Error(message),
        }
    }
}
