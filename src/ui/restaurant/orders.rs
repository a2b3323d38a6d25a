use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::models::{Order, OrderStatus};
use crate::api::{safe_call, SharedApi};
use crate::ui::mvi::Observable;
use crate::ui::screen::{ErrorCatalog, ScreenModel, ScreenState};

const ORDERS_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Orders Unavailable", "Failed to load orders");

/// Incoming orders of the owner's restaurant, one status tab at a time.
pub struct RestaurantOrdersModel {
    screen: ScreenModel<Vec<Order>>,
    api: SharedApi,
    status: Observable<OrderStatus>,
}

impl RestaurantOrdersModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            screen: ScreenModel::new("restaurant_orders", ORDERS_ERRORS),
            api,
            status: Observable::new(OrderStatus::Pending),
        }
    }

    /// Tab labels, one per status.
    pub fn order_types(&self) -> Vec<&'static str> {
        OrderStatus::ALL.iter().map(|s| s.as_str()).collect()
    }

    pub fn status(&self) -> &Observable<OrderStatus> {
        &self.status
    }

    pub fn state(&self) -> ScreenState<Vec<Order>> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<Order>>> {
        self.screen.subscribe()
    }

    /// Switch to `status` and load its orders. No orders is an empty
    /// `Success`.
    pub fn fetch_by_status(&self, status: OrderStatus) -> JoinHandle<()> {
        self.status.set(status);
        let api = SharedApi::clone(&self.api);
        self.screen.load(async move {
            safe_call(api.get_restaurant_orders(status.as_str()))
                .await
                .map(|list| list.orders)
        })
    }

    /// Reload the current tab.
    pub fn refresh(&self) -> JoinHandle<()> {
        self.fetch_by_status(self.status.get())
    }

    pub fn close(&self) {
        self.screen.close();
    }
}
