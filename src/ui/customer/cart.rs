use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::models::{
    Address, CartItem, CartResponse, ConfirmPaymentRequest, ConfirmPaymentResponse,
    PaymentIntentRequest, PaymentIntentResponse, UpdateCartItemRequest,
};
use crate::api::{safe_call, ApiResult, CallFailure, SharedApi, GENERIC_ERROR_CODE};
use crate::ui::mvi::{Observable, Signal};
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ErrorMessage, ScreenModel, ScreenState};

const CART_ERRORS: ErrorCatalog = ErrorCatalog::new("Cart Unavailable", "Failed to load your cart");

const PAYMENT_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Payment Failed", "Your payment could not be processed").with_entries(&[
        ErrorEntry {
            code: 402,
            title: "Payment Declined",
            description: "Please use another payment method.",
        },
    ]);

#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// Hand the intent to the external payment sheet.
    PresentPayment(PaymentIntentResponse),
    OrderSuccess(String),
}

/// Progress of checkout, shown separately from the cart contents.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentStep {
    IntentCreated(PaymentIntentResponse),
    Confirmed(ConfirmPaymentResponse),
}

pub struct CartModel {
    cart: ScreenModel<CartResponse>,
    payment: ScreenModel<PaymentStep>,
    api: SharedApi,
    address: Observable<Option<Address>>,
    events: Signal<CartEvent>,
}

impl CartModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            cart: ScreenModel::new("cart", CART_ERRORS),
            payment: ScreenModel::new("payment", PAYMENT_ERRORS),
            api,
            address: Observable::new(None),
            events: Signal::new(),
        }
    }

    pub fn state(&self) -> ScreenState<CartResponse> {
        self.cart.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<CartResponse>> {
        self.cart.subscribe()
    }

    pub fn payment_state(&self) -> ScreenState<PaymentStep> {
        self.payment.state()
    }

    pub fn subscribe_payment(&self) -> watch::Receiver<ScreenState<PaymentStep>> {
        self.payment.subscribe()
    }

    pub fn events(&self) -> mpsc::UnboundedReceiver<CartEvent> {
        self.events.subscribe()
    }

    pub fn address(&self) -> &Observable<Option<Address>> {
        &self.address
    }

    pub fn select_address(&self, address: Address) {
        self.address.set(Some(address));
    }

    pub fn load(&self) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        self.cart.load(async move { safe_call(api.get_cart()).await })
    }

    pub fn increment(&self, item: &CartItem) -> JoinHandle<()> {
        self.change_quantity(item, item.quantity.saturating_add(1))
    }

    /// Decrementing the last unit removes the line.
    pub fn decrement(&self, item: &CartItem) -> JoinHandle<()> {
        self.change_quantity(item, item.quantity.saturating_sub(1))
    }

    pub fn remove(&self, item: &CartItem) -> JoinHandle<()> {
        self.change_quantity(item, 0)
    }

    fn change_quantity(&self, item: &CartItem, quantity: u32) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        let cart_item_id = item.id.clone();
        self.cart.load(async move {
            ApiResult::from(update_and_refresh(api, cart_item_id, quantity).await)
        })
    }

    /// Create a payment intent for the selected address.
    pub fn checkout(&self) -> JoinHandle<()> {
        let Some(address_id) = self.selected_address_id() else {
            return self.reject_without_address("checkout");
        };

        let api = SharedApi::clone(&self.api);
        let events = self.events.clone();
        let request = PaymentIntentRequest { address_id };
        self.payment.load_then(
            async move {
                safe_call(api.create_payment_intent(&request))
                    .await
                    .map(PaymentStep::IntentCreated)
            },
            move |step| {
                if let PaymentStep::IntentCreated(intent) = step {
                    events.emit(CartEvent::PresentPayment(intent.clone()));
                }
            },
        )
    }

    /// Called once the payment sheet completed.
    pub fn confirm_payment(&self, intent: &PaymentIntentResponse) -> JoinHandle<()> {
        let Some(address_id) = self.selected_address_id() else {
            return self.reject_without_address("payment confirmation");
        };
        let api = SharedApi::clone(&self.api);
        let events = self.events.clone();
        let intent_id = intent.payment_intent_id.clone();
        let request = ConfirmPaymentRequest {
            payment_intent_id: intent_id.clone(),
            address_id,
        };
        self.payment.load_then(
            async move {
                safe_call(api.confirm_payment(&intent_id, &request))
                    .await
                    .map(PaymentStep::Confirmed)
            },
            move |step| {
                if let PaymentStep::Confirmed(ConfirmPaymentResponse {
                    order_id: Some(order_id),
                    ..
                }) = step
                {
                    events.emit(CartEvent::OrderSuccess(order_id.clone()));
                }
            },
        )
    }

    fn selected_address_id(&self) -> Option<String> {
        self.address.get().and_then(|a| a.id)
    }

    fn reject_without_address(&self, action: &str) -> JoinHandle<()> {
        self.payment.reject(ErrorMessage {
            code: GENERIC_ERROR_CODE,
            title: "No Address Selected".to_string(),
            description: "Please choose a delivery address.".to_string(),
            cause: format!("{} without address", action),
        })
    }

    pub fn close(&self) {
        self.cart.close();
        self.payment.close();
    }
}

async fn update_and_refresh(
    api: SharedApi,
    cart_item_id: String,
    quantity: u32,
) -> Result<CartResponse, CallFailure> {
    if quantity == 0 {
        safe_call(api.delete_cart_item(&cart_item_id))
            .await
            .into_result()?;
    } else {
        let request = UpdateCartItemRequest {
            cart_item_id,
            quantity,
        };
        safe_call(api.update_cart(&request)).await.into_result()?;
    }
    safe_call(api.get_cart()).await.into_result()
}
