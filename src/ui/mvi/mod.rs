//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the building blocks for unidirectional data flow
//! in the presentation layer.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of a screen
//! - **Intent**: User actions or call outcomes
//! - **Reducer**: Pure function that transforms state based on intents
//! - **Store**: Observable state plus a reducer, bound to a [`ScreenScope`]
//! - **Signal**: One-shot events (navigation) that are never replayed

mod intent;
mod observable;
mod reducer;
mod scope;
mod signal;
mod state;
mod store;

pub use intent::Intent;
pub use observable::Observable;
pub use reducer::Reducer;
pub use scope::{ScopeHandle, ScreenScope};
pub use signal::Signal;
pub use state::UiState;
pub use store::Store;
