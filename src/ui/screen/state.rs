use crate::ui::mvi::UiState;

/// Bounds shared by every screen payload.
pub trait Payload: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> Payload for T {}

/// User-facing description of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    /// HTTP status, or 0 when no response was received.
    pub code: u16,
    pub title: String,
    pub description: String,
    /// Raw message from the result wrapper.
    pub cause: String,
}

/// What a screen currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    /// No action has been taken yet.
    Nothing,
    /// A call is in flight.
    Loading,
    /// The last call succeeded.
    Success(T),
    /// The last call failed.
    Error(ErrorMessage),
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        ScreenState::Nothing
    }
}

impl<T: Payload> UiState for ScreenState<T> {}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// A call has completed, one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorMessage> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
