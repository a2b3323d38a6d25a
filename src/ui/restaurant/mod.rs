//! Screens of the restaurant-owner app.

mod menu;
mod order_details;
mod orders;
mod profile;

pub use menu::{AddMenuItemModel, MenuEvent, MenuModel};
pub use order_details::RestaurantOrderDetailsModel;
pub use orders::RestaurantOrdersModel;
pub use profile::RestaurantProfileModel;
