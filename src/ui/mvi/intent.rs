//! Screen intent marker.

/// Input to a [`Reducer`](super::Reducer).
///
/// Screen intents describe the progress of one action: it started, its
/// call produced a payload, or it failed remotely or during local
/// validation. They are moved into a spawned task, hence `Send`.
pub trait Intent: Send + 'static {}
