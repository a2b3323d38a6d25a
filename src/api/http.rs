//! Reqwest-backed implementation of [`FoodApi`].

use std::time::Instant;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use thiserror::Error;

use super::food_api::{ApiCall, FoodApi};
use super::models::*;
use super::reply::{Reply, TransportError};
use crate::config::{ApiConfig, ConfigError};
use crate::session::Session;

/// Errors raised while constructing the HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP client for the FoodHub backend.
///
/// Attaches the session's bearer token (when present) and a fresh
/// `X-Request-Id` to every request. Non-2xx replies are returned as-is.
pub struct HttpFoodApi {
    client: Client,
    base_url: Url,
    session: Session,
}

impl HttpFoodApi {
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self, ClientError> {
        let base_url = config.parsed_base_url()?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(&self, segments: &[&str]) -> ApiCall<T> {
        let url = self.endpoint(segments)?;
        self.dispatch(self.client.get(url)).await
    }

    async fn get_with_query<T>(&self, segments: &[&str], query: &[(&str, String)]) -> ApiCall<T> {
        let mut url = self.endpoint(segments)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        self.dispatch(self.client.get(url)).await
    }

    async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: &B) -> ApiCall<T>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(segments)?;
        self.dispatch(self.client.request(method, url).json(body)).await
    }

    async fn send_empty<T>(&self, method: Method, segments: &[&str]) -> ApiCall<T> {
        let url = self.endpoint(segments)?;
        self.dispatch(self.client.request(method, url)).await
    }

    async fn dispatch<T>(&self, builder: RequestBuilder) -> ApiCall<T> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut builder = builder.header("X-Request-Id", request_id.as_str());
        if let Some((name, value)) = self.session.bearer_header() {
            builder = builder.header(name, value);
        }

        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!(%method, %path, %request_id, "Sending request");

        let started = Instant::now();
        let response = self.client.execute(request).await.map_err(|e| {
            tracing::debug!(%method, %path, %request_id, error = %e, "Request failed");
            TransportError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        tracing::debug!(
            %method,
            %path,
            %request_id,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received response"
        );

        Ok(Reply::new(status, body.to_vec()))
    }
}

#[async_trait]
impl FoodApi for HttpFoodApi {
    async fn get_categories(&self) -> ApiCall<CategoriesResponse> {
        self.get(&["categories"]).await
    }

    async fn get_restaurants(&self, lat: f64, lon: f64) -> ApiCall<RestaurantsResponse> {
        self.get_with_query(
            &["restaurants"],
            &[("lat", lat.to_string()), ("lon", lon.to_string())],
        )
        .await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> ApiCall<AuthResponse> {
        self.send_json(Method::POST, &["auth", "signup"], request).await
    }

    async fn sign_in(&self, request: &SignInRequest) -> ApiCall<AuthResponse> {
        self.send_json(Method::POST, &["auth", "login"], request).await
    }

    async fn oauth(&self, request: &OAuthRequest) -> ApiCall<AuthResponse> {
        self.send_json(Method::POST, &["auth", "oauth"], request).await
    }

    async fn get_food_items_for_restaurant(
        &self,
        restaurant_id: &str,
    ) -> ApiCall<FoodItemResponse> {
        self.get(&["restaurants", restaurant_id, "menu"]).await
    }

    async fn add_to_cart(&self, request: &AddToCartRequest) -> ApiCall<AddToCartResponse> {
        self.send_json(Method::POST, &["cart"], request).await
    }

    async fn get_cart(&self) -> ApiCall<CartResponse> {
        self.get(&["cart"]).await
    }

    async fn update_cart(&self, request: &UpdateCartItemRequest) -> ApiCall<GenericMsgResponse> {
        self.send_json(Method::PATCH, &["cart"], request).await
    }

    async fn delete_cart_item(&self, cart_item_id: &str) -> ApiCall<GenericMsgResponse> {
        self.send_empty(Method::DELETE, &["cart", cart_item_id]).await
    }

    async fn get_user_addresses(&self) -> ApiCall<AddressListResponse> {
        self.get(&["addresses"]).await
    }

    async fn reverse_geocode(&self, request: &ReverseGeoCodeRequest) -> ApiCall<Address> {
        self.send_json(Method::POST, &["addresses", "reverse-geocode"], request).await
    }

    async fn store_address(&self, address: &Address) -> ApiCall<GenericMsgResponse> {
        self.send_json(Method::POST, &["addresses"], address).await
    }

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> ApiCall<PaymentIntentResponse> {
        self.send_json(Method::POST, &["payments", "create-intent"], request).await
    }

    async fn confirm_payment(
        &self,
        payment_intent_id: &str,
        request: &ConfirmPaymentRequest,
    ) -> ApiCall<ConfirmPaymentResponse> {
        self.send_json(
            Method::POST,
            &["payments", "confirm", payment_intent_id],
            request,
        )
        .await
    }

    async fn get_orders(&self) -> ApiCall<OrderListResponse> {
        self.get(&["orders"]).await
    }

    async fn get_order_details(&self, order_id: &str) -> ApiCall<Order> {
        self.get(&["orders", order_id]).await
    }

    async fn update_device_token(
        &self,
        request: &DeviceTokenRequest,
    ) -> ApiCall<GenericMsgResponse> {
        self.send_json(Method::PUT, &["notifications", "fcm-token"], request).await
    }

    async fn read_notification(&self, notification_id: &str) -> ApiCall<GenericMsgResponse> {
        self.send_empty(Method::POST, &["notifications", notification_id, "read"]).await
    }

    async fn get_notifications(&self) -> ApiCall<NotificationListResponse> {
        self.get(&["notifications"]).await
    }

    async fn get_restaurant_profile(&self) -> ApiCall<Restaurant> {
        self.get(&["restaurant-owner", "profile"]).await
    }

    async fn get_restaurant_orders(&self, status: &str) -> ApiCall<OrderListResponse> {
        self.get_with_query(
            &["restaurant-owner", "orders"],
            &[("status", status.to_string())],
        )
        .await
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        request: &UpdateOrderStatusRequest,
    ) -> ApiCall<GenericMsgResponse> {
        self.send_json(Method::PATCH, &["orders", order_id, "status"], request).await
    }

    async fn get_restaurant_menu(&self, restaurant_id: &str) -> ApiCall<FoodItemListResponse> {
        self.get(&["restaurants", restaurant_id, "menu"]).await
    }

    async fn add_restaurant_menu(
        &self,
        restaurant_id: &str,
        item: &FoodItem,
    ) -> ApiCall<GenericMsgResponse> {
        self.send_json(Method::POST, &["restaurants", restaurant_id, "menu"], item).await
    }

    async fn upload_image(&self, image: ImageUpload) -> ApiCall<ImageUploadResponse> {
        let url = self.endpoint(&["images", "upload"])?;
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        let form = Form::new().part("image", part);

        self.dispatch(self.client.post(url).multipart(form)).await
    }

    async fn get_available_deliveries(&self) -> ApiCall<DeliveriesListResponse> {
        self.get(&["rider", "deliveries", "available"]).await
    }

    async fn reject_delivery(&self, order_id: &str) -> ApiCall<GenericMsgResponse> {
        self.send_empty(Method::POST, &["rider", "deliveries", order_id, "reject"]).await
    }

    async fn accept_delivery(&self, order_id: &str) -> ApiCall<GenericMsgResponse> {
        self.send_empty(Method::POST, &["rider", "deliveries", order_id, "accept"]).await
    }

    async fn get_active_deliveries(&self) -> ApiCall<RiderDeliveryOrderListResponse> {
        self.get(&["rider", "deliveries", "active"]).await
    }
}
