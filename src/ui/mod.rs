//! Presentation state holders.
//!
//! [`mvi`] holds the state/intent/reducer plumbing, [`screen`] the generic
//! per-screen model built on it. The remaining modules are the screens of
//! each app flavor.

pub mod auth;
pub mod customer;
pub mod mvi;
pub mod notifications;
pub mod restaurant;
pub mod rider;
pub mod screen;
