//! Client core of the FoodHub delivery apps.
//!
//! One typed REST client ([`api`]) serves three app flavors (customer,
//! restaurant owner, rider). Each screen owns a state holder from [`ui`]
//! that turns remote calls into a single observable screen state.

pub mod api;
pub mod config;
pub mod flavor;
pub mod logging;
pub mod session;
pub mod ui;

pub use flavor::Flavor;
