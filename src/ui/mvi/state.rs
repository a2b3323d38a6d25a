//! Screen state marker.

/// Snapshot a screen renders from.
///
/// Held in a `watch` channel and cloned out to observers on other tasks,
/// hence `Send + Sync`. `Default` is the state before any action (`Nothing`
/// for remote-backed screens); `PartialEq` lets observers skip repeats.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
