use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::models::Order;
use crate::api::{safe_call, SharedApi};
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ScreenModel, ScreenState};

const ORDER_LIST_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Orders Unavailable", "Failed to load your orders");

const ORDER_DETAILS_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Order Unavailable", "Failed to load the order").with_entries(&[ErrorEntry {
        code: 404,
        title: "Order Not Found",
        description: "This order does not exist.",
    }]);

/// Customer's order history.
pub struct OrderListModel {
    screen: ScreenModel<Vec<Order>>,
    api: SharedApi,
}

impl OrderListModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            screen: ScreenModel::new("order_list", ORDER_LIST_ERRORS),
            api,
        }
    }

    pub fn state(&self) -> ScreenState<Vec<Order>> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<Order>>> {
        self.screen.subscribe()
    }

    pub fn load(&self) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        self.screen
            .load(async move { safe_call(api.get_orders()).await.map(|list| list.orders) })
    }

    /// Loaded orders that are still moving.
    pub fn upcoming(&self) -> Vec<Order> {
        self.filtered(|order| !order.status.is_final())
    }

    /// Loaded orders in a final status.
    pub fn history(&self) -> Vec<Order> {
        self.filtered(|order| order.status.is_final())
    }

    fn filtered(&self, keep: impl Fn(&Order) -> bool) -> Vec<Order> {
        self.screen
            .state()
            .payload()
            .map(|orders| orders.iter().filter(|o| keep(o)).cloned().collect())
            .unwrap_or_default()
    }

    pub fn close(&self) {
        self.screen.close();
    }
}

pub struct OrderDetailsModel {
    screen: ScreenModel<Order>,
    api: SharedApi,
    order_id: String,
}

impl OrderDetailsModel {
    pub fn new(api: SharedApi, order_id: impl Into<String>) -> Self {
        Self {
            screen: ScreenModel::new("order_details", ORDER_DETAILS_ERRORS),
            api,
            order_id: order_id.into(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn state(&self) -> ScreenState<Order> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Order>> {
        self.screen.subscribe()
    }

    pub fn load(&self) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        let order_id = self.order_id.clone();
        self.screen
            .load(async move { safe_call(api.get_order_details(&order_id)).await })
    }

    pub fn close(&self) {
        self.screen.close();
    }
}
