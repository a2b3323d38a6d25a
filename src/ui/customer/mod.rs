//! Screens of the customer app.

mod address;
mod cart;
mod food_details;
mod home;
mod orders;
mod restaurant_details;

pub use address::{AddAddressModel, AddressEvent, AddressListModel};
pub use cart::{CartEvent, CartModel, PaymentStep};
pub use food_details::{FoodDetailsEvent, FoodDetailsModel};
pub use home::{HomeFeed, HomeModel};
pub use orders::{OrderDetailsModel, OrderListModel};
pub use restaurant_details::RestaurantDetailsModel;
