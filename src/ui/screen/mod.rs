//! Generic per-screen state projection.
//!
//! Every screen shows one [`ScreenState`] at a time and moves through
//! `Nothing -> Loading -> Success | Error` for each user action.

mod errors;
mod intent;
mod model;
mod reducer;
mod state;

pub use errors::{ErrorCatalog, ErrorEntry, GENERIC_ERRORS};
pub use intent::ScreenIntent;
pub use model::ScreenModel;
pub use reducer::ScreenReducer;
pub use state::{ErrorMessage, Payload, ScreenState};
