//! Screens of the rider app.

mod deliveries;

pub use deliveries::{DeliveriesModel, DeliveryList, DeliveryTab};
