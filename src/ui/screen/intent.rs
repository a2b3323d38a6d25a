use crate::ui::mvi::Intent;

use super::state::{ErrorMessage, Payload};

/// Transitions a screen goes through for one user action.
#[derive(Debug, Clone)]
pub enum ScreenIntent<T> {
    /// A call was issued.
    Started,
    /// The call succeeded with this payload.
    Loaded(T),
    /// The call failed, or the action was refused before a call.
    Failed(ErrorMessage),
}

impl<T: Payload> Intent for ScreenIntent<T> {}
