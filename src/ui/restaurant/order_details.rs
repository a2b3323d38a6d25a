use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::models::{Order, OrderStatus, UpdateOrderStatusRequest};
use crate::api::{safe_call, ApiResult, CallFailure, SharedApi};
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ScreenModel, ScreenState};

const ORDER_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Update Failed", "Failed to update the order").with_entries(&[
        ErrorEntry {
            code: 404,
            title: "Order Not Found",
            description: "This order does not exist.",
        },
        ErrorEntry {
            code: 409,
            title: "Status Not Allowed",
            description: "The order cannot move to that status.",
        },
    ]);

/// One order as seen by the restaurant, with status actions.
pub struct RestaurantOrderDetailsModel {
    screen: ScreenModel<Order>,
    api: SharedApi,
    order_id: String,
}

impl RestaurantOrderDetailsModel {
    pub fn new(api: SharedApi, order_id: impl Into<String>) -> Self {
        Self {
            screen: ScreenModel::new("restaurant_order_details", ORDER_ERRORS),
            api,
            order_id: order_id.into(),
        }
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

    pub fn accept(&self) -> JoinHandle<()> {
        self.set_status(OrderStatus::Accepted)
    }

    pub fn reject(&self) -> JoinHandle<()> {
        self.set_status(OrderStatus::Rejected)
    }

    /// Move the order to `status`, then show the reloaded order.
    pub fn set_status(&self, status: OrderStatus) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        let order_id = self.order_id.clone();
        self.screen.load(async move {
            ApiResult::from(update_and_reload(api, order_id, status).await)
        })
    }

    pub fn close(&self) {
        self.screen.close();
    }
}

async fn update_and_reload(
    api: SharedApi,
    order_id: String,
    status: OrderStatus,
) -> Result<Order, CallFailure> {
    let request = UpdateOrderStatusRequest {
        status: status.as_str().to_string(),
    };
    safe_call(api.update_order_status(&order_id, &request))
        .await
        .into_result()?;
    safe_call(api.get_order_details(&order_id))
        .await
        .into_result()
}
