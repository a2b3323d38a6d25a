//! Remote access layer.
//!
//! [`FoodApi`] lists the backend endpoints and [`HttpFoodApi`] implements
//! them over HTTP. Calls return a raw [`Reply`]; [`safe_call`] turns that
//! into an [`ApiResult`] for the presentation layer.

mod food_api;
mod http;
pub mod models;
mod reply;
mod result;

pub use food_api::{ApiCall, FoodApi, SharedApi};
pub use http::{ClientError, HttpFoodApi};
pub use reply::{Reply, TransportError};
pub use result::{safe_call, ApiError, ApiResult, CallFailure, GENERIC_ERROR_CODE};
