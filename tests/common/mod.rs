//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use foodhub::api::models::*;
use foodhub::api::{ApiCall, FoodApi, HttpFoodApi, Reply, SharedApi, TransportError};
use foodhub::config::ApiConfig;
use foodhub::session::Session;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Create a temporary config file with the given contents.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// HTTP client pointed at `base_url` with short timeouts.
pub fn http_api(base_url: &str, session: Session) -> HttpFoodApi {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
        ..ApiConfig::default()
    };
    HttpFoodApi::new(&config, session).expect("Failed to build client")
}

// -- Scripted API -------------------------------------------------------------

/// What a scripted endpoint answers.
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply { status: u16, body: String, delay_ms: u64 },
    Transport(TransportError),
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub endpoint: &'static str,
    pub args: Vec<String>,
}

/// In-memory [`FoodApi`] answering from per-endpoint queues.
///
/// Unscripted calls answer `500`.
#[derive(Default)]
pub struct FakeFoodApi {
    script: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeFoodApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shared(self: &Arc<Self>) -> SharedApi {
        Arc::clone(self) as SharedApi
    }

    /// Queue a reply with `status` and a raw JSON `body`.
    pub fn reply(&self, endpoint: &'static str, status: u16, body: &str) -> &Self {
        self.push(
            endpoint,
            Scripted::Reply {
                status,
                body: body.to_string(),
                delay_ms: 0,
            },
        )
    }

    pub fn reply_json(&self, endpoint: &'static str, value: serde_json::Value) -> &Self {
        self.reply(endpoint, 200, &value.to_string())
    }

    pub fn reply_after(&self, endpoint: &'static str, delay_ms: u64, body: &str) -> &Self {
        self.push(
            endpoint,
            Scripted::Reply {
                status: 200,
                body: body.to_string(),
                delay_ms,
            },
        )
    }

    pub fn fail(&self, endpoint: &'static str, error: TransportError) -> &Self {
        self.push(endpoint, Scripted::Transport(error))
    }

    fn push(&self, endpoint: &'static str, answer: Scripted) -> &Self {
        self.script
            .lock()
            .entry(endpoint)
            .or_default()
            .push_back(answer);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn endpoints(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(|c| c.endpoint).collect()
    }

    async fn answer<T>(&self, endpoint: &'static str, args: Vec<String>) -> ApiCall<T> {
        self.calls.lock().push(Call { endpoint, args });
        let next = self
            .script
            .lock()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Scripted::Reply {
                status,
                body,
                delay_ms,
            }) => {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Ok(Reply::new(status, body))
            }
            Some(Scripted::Transport(error)) => Err(error),
            None => Ok(Reply::new(
                500,
                format!(r#"{{"message":"unscripted {}"}}"#, endpoint),
            )),
        }
    }
}

fn body<B: Serialize>(value: &B) -> String {
    serde_json::to_string(value).expect("request must serialize")
}

#[async_trait]
impl FoodApi for FakeFoodApi {
    async fn get_categories(&self) -> ApiCall<CategoriesResponse> {
        self.answer("get_categories", vec![]).await
    }

    async fn get_restaurants(&self, lat: f64, lon: f64) -> ApiCall<RestaurantsResponse> {
        self.answer("get_restaurants", vec![lat.to_string(), lon.to_string()])
            .await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> ApiCall<AuthResponse> {
        self.answer("sign_up", vec![body(request)]).await
    }

    async fn sign_in(&self, request: &SignInRequest) -> ApiCall<AuthResponse> {
        self.answer("sign_in", vec![body(request)]).await
    }

    async fn oauth(&self, request: &OAuthRequest) -> ApiCall<AuthResponse> {
        self.answer("oauth", vec![body(request)]).await
    }

    async fn get_food_items_for_restaurant(
        &self,
        restaurant_id: &str,
    ) -> ApiCall<FoodItemResponse> {
        self.answer("get_food_items_for_restaurant", vec![restaurant_id.into()])
            .await
    }

    async fn add_to_cart(&self, request: &AddToCartRequest) -> ApiCall<AddToCartResponse> {
        self.answer("add_to_cart", vec![body(request)]).await
    }

    async fn get_cart(&self) -> ApiCall<CartResponse> {
        self.answer("get_cart", vec![]).await
    }

    async fn update_cart(&self, request: &UpdateCartItemRequest) -> ApiCall<GenericMsgResponse> {
        self.answer("update_cart", vec![body(request)]).await
    }

    async fn delete_cart_item(&self, cart_item_id: &str) -> ApiCall<GenericMsgResponse> {
        self.answer("delete_cart_item", vec![cart_item_id.into()])
            .await
    }

    async fn get_user_addresses(&self) -> ApiCall<AddressListResponse> {
        self.answer("get_user_addresses", vec![]).await
    }

    async fn reverse_geocode(&self, request: &ReverseGeoCodeRequest) -> ApiCall<Address> {
        self.answer("reverse_geocode", vec![body(request)]).await
    }

    async fn store_address(&self, address: &Address) -> ApiCall<GenericMsgResponse> {
        self.answer("store_address", vec![body(address)]).await
    }

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> ApiCall<PaymentIntentResponse> {
        self.answer("create_payment_intent", vec![body(request)])
            .await
    }

    async fn confirm_payment(
        &self,
        payment_intent_id: &str,
        request: &ConfirmPaymentRequest,
    ) -> ApiCall<ConfirmPaymentResponse> {
        self.answer(
            "confirm_payment",
            vec![payment_intent_id.into(), body(request)],
        )
        .await
    }

    async fn get_orders(&self) -> ApiCall<OrderListResponse> {
        self.answer("get_orders", vec![]).await
    }

    async fn get_order_details(&self, order_id: &str) -> ApiCall<Order> {
        self.answer("get_order_details", vec![order_id.into()]).await
    }

    async fn update_device_token(
        &self,
        request: &DeviceTokenRequest,
    ) -> ApiCall<GenericMsgResponse> {
        self.answer("update_device_token", vec![body(request)]).await
    }

    async fn read_notification(&self, notification_id: &str) -> ApiCall<GenericMsgResponse> {
        self.answer("read_notification", vec![notification_id.into()])
            .await
    }

    async fn get_notifications(&self) -> ApiCall<NotificationListResponse> {
        self.answer("get_notifications", vec![]).await
    }

    async fn get_restaurant_profile(&self) -> ApiCall<Restaurant> {
        self.answer("get_restaurant_profile", vec![]).await
    }

    async fn get_restaurant_orders(&self, status: &str) -> ApiCall<OrderListResponse> {
        self.answer("get_restaurant_orders", vec![status.into()]).await
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        request: &UpdateOrderStatusRequest,
    ) -> ApiCall<GenericMsgResponse> {
        self.answer("update_order_status", vec![order_id.into(), body(request)])
            .await
    }

    async fn get_restaurant_menu(&self, restaurant_id: &str) -> ApiCall<FoodItemListResponse> {
        self.answer("get_restaurant_menu", vec![restaurant_id.into()])
            .await
    }

    async fn add_restaurant_menu(
        &self,
        restaurant_id: &str,
        item: &FoodItem,
    ) -> ApiCall<GenericMsgResponse> {
        self.answer("add_restaurant_menu", vec![restaurant_id.into(), body(item)])
            .await
    }

    async fn upload_image(&self, image: ImageUpload) -> ApiCall<ImageUploadResponse> {
        self.answer("upload_image", vec![image.file_name]).await
    }

    async fn get_available_deliveries(&self) -> ApiCall<DeliveriesListResponse> {
        self.answer("get_available_deliveries", vec![]).await
    }

    async fn reject_delivery(&self, order_id: &str) -> ApiCall<GenericMsgResponse> {
        self.answer("reject_delivery", vec![order_id.into()]).await
    }

    async fn accept_delivery(&self, order_id: &str) -> ApiCall<GenericMsgResponse> {
        self.answer("accept_delivery", vec![order_id.into()]).await
    }

    async fn get_active_deliveries(&self) -> ApiCall<RiderDeliveryOrderListResponse> {
        self.answer("get_active_deliveries", vec![]).await
    }
}

// -- Fixtures -----------------------------------------------------------------

pub const ORDER_JSON: &str = r#"{
    "id": "o-1",
    "restaurantId": "r-1",
    "status": "PENDING",
    "totalAmount": 24.5,
    "items": [{"id": "i-1", "menuItemId": "m-1", "quantity": 2, "menuItemName": "Pad Thai"}]
}"#;

pub fn order_json(id: &str, status: &str) -> String {
    ORDER_JSON
        .replace("\"o-1\"", &format!("\"{}\"", id))
        .replace("\"PENDING\"", &format!("\"{}\"", status))
}

pub const CART_JSON: &str = r#"{
    "items": [{
        "id": "c-1",
        "restaurantId": "r-1",
        "menuItemId": {"id": "m-1", "name": "Pad Thai", "description": "Noodles", "price": 12.25},
        "quantity": 2
    }],
    "checkoutDetails": {"subTotal": 24.5, "totalAmount": 29.0, "tax": 1.5, "deliveryFee": 3.0}
}"#;
