//! Wire records exchanged with the FoodHub backend.
//!
//! Field names are camelCase on the wire. Optional fields default so that
//! partially populated server payloads still decode.

use serde::{Deserialize, Serialize};

// === Auth ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Third-party identity exchanged for a FoodHub token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthRequest {
    pub token: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Plain acknowledgement returned by mutating endpoints.
///
/// Some endpoints answer `204` or `{}`; the message is then empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericMsgResponse {
    #[serde(default)]
    pub message: String,
}

// === Catalog ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub data: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantsResponse {
    pub data: Vec<Restaurant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_model_url: Option<String>,
}

/// Customer-facing menu listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemResponse {
    pub food_items: Vec<FoodItem>,
}

/// Owner-facing menu listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemListResponse {
    pub food_items: Vec<FoodItem>,
}

// === Cart ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub restaurant_id: String,
    pub menu_item_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub restaurant_id: String,
    pub menu_item_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub added_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub restaurant_id: String,
    #[serde(rename = "menuItemId")]
    pub menu_item: FoodItem,
    pub quantity: u32,
    #[serde(default)]
    pub added_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub sub_total: f64,
    pub total_amount: f64,
    pub tax: f64,
    pub delivery_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub checkout_details: CheckoutDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub cart_item_id: String,
    pub quantity: u32,
}

// === Addresses ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressListResponse {
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeoCodeRequest {
    pub latitude: f64,
    pub longitude: f64,
}

// === Payments ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub address_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub payment_intent_client_secret: String,
    pub payment_intent_id: String,
    pub customer_id: String,
    pub ephemeral_key_secret: String,
    pub publishable_key: String,
    pub amount: f64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub payment_intent_id: String,
    pub address_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentResponse {
    pub status: String,
    #[serde(default)]
    pub requires_action: bool,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// === Orders ===

/// Lifecycle of an order as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Ready,
    Assigned,
    OutForDelivery,
    Delivered,
    DeliveryFailed,
    Rejected,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Every status an owner can filter by, in display order.
    pub const ALL: [OrderStatus; 10] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Assigned,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::DeliveryFailed,
        OrderStatus::Rejected,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Assigned => "ASSIGNED",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::DeliveryFailed => "DELIVERY_FAILED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parse a wire name. Case-insensitive; unrecognised names are `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(name))
    }

    /// Whether the order has reached a terminal state.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered
                | OrderStatus::DeliveryFailed
                | OrderStatus::Rejected
                | OrderStatus::Cancelled
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    pub menu_item_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub menu_item_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub restaurant_id: String,
    #[serde(default)]
    pub address: Option<Address>,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub stripe_payment_intent_id: Option<String>,
    pub total_amount: f64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub restaurant: Option<Restaurant>,
    #[serde(default)]
    pub rider_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

// === Notifications ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub unread_count: u32,
}

// === Uploads ===

/// Image bytes submitted as the `image` multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub url: String,
}

// === Rider ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryItem {
    pub order_id: String,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub customer_address: String,
    pub order_amount: f64,
    #[serde(default)]
    pub estimated_distance: Option<f64>,
    #[serde(default)]
    pub estimated_earning: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveriesListResponse {
    pub data: Vec<DeliveryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryParty {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderDeliveryOrder {
    pub order_id: String,
    pub status: OrderStatus,
    pub restaurant: DeliveryParty,
    pub customer: DeliveryParty,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    #[serde(default)]
    pub estimated_distance: Option<f64>,
    #[serde(default)]
    pub estimated_earning: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderDeliveryOrderListResponse {
    pub data: Vec<RiderDeliveryOrder>,
}
