//! Declarative list of backend endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use super::models::*;
use super::reply::{Reply, TransportError};

/// Raw outcome of one endpoint call.
pub type ApiCall<T> = Result<Reply<T>, TransportError>;

/// Handle passed to every state holder.
pub type SharedApi = Arc<dyn FoodApi>;

/// One method per FoodHub endpoint.
///
/// Implementations only move bytes: a reply with any status is `Ok`, and
/// `Err` means no response was received. Callers classify with
/// [`safe_call`](super::safe_call).
#[async_trait]
pub trait FoodApi: Send + Sync {
    /// `GET /categories`
    async fn get_categories(&self) -> ApiCall<CategoriesResponse>;

    /// `GET /restaurants?lat=&lon=`
    async fn get_restaurants(&self, lat: f64, lon: f64) -> ApiCall<RestaurantsResponse>;

    /// `POST /auth/signup`
    async fn sign_up(&self, request: &SignUpRequest) -> ApiCall<AuthResponse>;

    /// `POST /auth/login`
    async fn sign_in(&self, request: &SignInRequest) -> ApiCall<AuthResponse>;

    /// `POST /auth/oauth`
    async fn oauth(&self, request: &OAuthRequest) -> ApiCall<AuthResponse>;

    /// `GET /restaurants/{restaurant_id}/menu`
    async fn get_food_items_for_restaurant(
        &self,
        restaurant_id: &str,
    ) -> ApiCall<FoodItemResponse>;

    /// `POST /cart`
    async fn add_to_cart(&self, request: &AddToCartRequest) -> ApiCall<AddToCartResponse>;

    /// `GET /cart`
    async fn get_cart(&self) -> ApiCall<CartResponse>;

    /// `PATCH /cart`
    async fn update_cart(&self, request: &UpdateCartItemRequest) -> ApiCall<GenericMsgResponse>;

    /// `DELETE /cart/{cart_item_id}`
    async fn delete_cart_item(&self, cart_item_id: &str) -> ApiCall<GenericMsgResponse>;

    /// `GET /addresses`
    async fn get_user_addresses(&self) -> ApiCall<AddressListResponse>;

    /// `POST /addresses/reverse-geocode`
    async fn reverse_geocode(&self, request: &ReverseGeoCodeRequest) -> ApiCall<Address>;

    /// `POST /addresses`
    async fn store_address(&self, address: &Address) -> ApiCall<GenericMsgResponse>;

    /// `POST /payments/create-intent`
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> ApiCall<PaymentIntentResponse>;

    /// `POST /payments/confirm/{payment_intent_id}`
    async fn confirm_payment(
        &self,
        payment_intent_id: &str,
        request: &ConfirmPaymentRequest,
    ) -> ApiCall<ConfirmPaymentResponse>;

    /// `GET /orders`
    async fn get_orders(&self) -> ApiCall<OrderListResponse>;

    /// `GET /orders/{order_id}`
    async fn get_order_details(&self, order_id: &str) -> ApiCall<Order>;

    /// `PUT /notifications/fcm-token`
    async fn update_device_token(
        &self,
        request: &DeviceTokenRequest,
    ) -> ApiCall<GenericMsgResponse>;

    /// `POST /notifications/{id}/read`
    async fn read_notification(&self, notification_id: &str) -> ApiCall<GenericMsgResponse>;

    /// `GET /notifications`
    async fn get_notifications(&self) -> ApiCall<NotificationListResponse>;

    /// `GET /restaurant-owner/profile`
    async fn get_restaurant_profile(&self) -> ApiCall<Restaurant>;

    /// `GET /restaurant-owner/orders?status=`
    async fn get_restaurant_orders(&self, status: &str) -> ApiCall<OrderListResponse>;

    /// `PATCH /orders/{order_id}/status`
    async fn update_order_status(
        &self,
        order_id: &str,
        request: &UpdateOrderStatusRequest,
    ) -> ApiCall<GenericMsgResponse>;

    /// `GET /restaurants/{restaurant_id}/menu`
    async fn get_restaurant_menu(&self, restaurant_id: &str) -> ApiCall<FoodItemListResponse>;

    /// `POST /restaurants/{restaurant_id}/menu`
    async fn add_restaurant_menu(
        &self,
        restaurant_id: &str,
        item: &FoodItem,
    ) -> ApiCall<GenericMsgResponse>;

    /// `POST /images/upload` (multipart, part `image`)
    async fn upload_image(&self, image: ImageUpload) -> ApiCall<ImageUploadResponse>;

    /// `GET /rider/deliveries/available`
    async fn get_available_deliveries(&self) -> ApiCall<DeliveriesListResponse>;

    /// `POST /rider/deliveries/{order_id}/reject`
    async fn reject_delivery(&self, order_id: &str) -> ApiCall<GenericMsgResponse>;

    /// `POST /rider/deliveries/{order_id}/accept`
    async fn accept_delivery(&self, order_id: &str) -> ApiCall<GenericMsgResponse>;

    /// `GET /rider/deliveries/active`
    async fn get_active_deliveries(&self) -> ApiCall<RiderDeliveryOrderListResponse>;
}
