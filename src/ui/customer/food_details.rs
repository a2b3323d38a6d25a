use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::models::{AddToCartRequest, AddToCartResponse, FoodItem};
use crate::api::{safe_call, SharedApi};
use crate::ui::mvi::{Observable, Signal};
use crate::ui::screen::{ErrorCatalog, ErrorMessage, ScreenModel, ScreenState};

const ADD_TO_CART_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Not Added", "Failed to add the item to your cart");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodDetailsEvent {
    ShowCart,
}

/// One menu item with a quantity counter and "add to cart".
pub struct FoodDetailsModel {
    screen: ScreenModel<AddToCartResponse>,
    api: SharedApi,
    item: FoodItem,
    quantity: Observable<u32>,
    events: Signal<FoodDetailsEvent>,
}

impl FoodDetailsModel {
    pub fn new(api: SharedApi, item: FoodItem) -> Self {
        Self {
            screen: ScreenModel::new("food_details", ADD_TO_CART_ERRORS),
            api,
            item,
            quantity: Observable::new(1),
            events: Signal::new(),
        }
    }

    pub fn item(&self) -> &FoodItem {
        &self.item
    }

    pub fn state(&self) -> ScreenState<AddToCartResponse> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<AddToCartResponse>> {
        self.screen.subscribe()
    }

    pub fn events(&self) -> mpsc::UnboundedReceiver<FoodDetailsEvent> {
        self.events.subscribe()
    }

    pub fn quantity(&self) -> &Observable<u32> {
        &self.quantity
    }

    pub fn increment(&self) {
        self.quantity.update(|q| *q = q.saturating_add(1));
    }

    /// Never goes below one.
    pub fn decrement(&self) {
        self.quantity.update(|q| *q = q.saturating_sub(1).max(1));
    }

    pub fn add_to_cart(&self) -> JoinHandle<()> {
        let (Some(menu_item_id), Some(restaurant_id)) =
            (self.item.id.clone(), self.item.restaurant_id.clone())
        else {
            return self.screen.reject(ErrorMessage {
                code: crate::api::GENERIC_ERROR_CODE,
                title: "Not Added".to_string(),
                description: "This item cannot be ordered.".to_string(),
                cause: format!("menu item '{}' has no id", self.item.name),
            });
        };

        let api = SharedApi::clone(&self.api);
        let request = AddToCartRequest {
            restaurant_id,
            menu_item_id,
            quantity: self.quantity.get(),
        };
        let events = self.events.clone();
        self.screen.load_then(
            async move { safe_call(api.add_to_cart(&request)).await },
            move |_| {
                events.emit(FoodDetailsEvent::ShowCart);
            },
        )
    }

    pub fn close(&self) {
        self.screen.close();
    }
}
