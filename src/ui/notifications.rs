//! Notification inbox shared by every flavor.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::models::{
    DeviceTokenRequest, GenericMsgResponse, Notification, NotificationListResponse,
};
use crate::api::{safe_call, ApiResult, CallFailure, SharedApi};
use crate::ui::mvi::Signal;
use crate::ui::screen::{ErrorCatalog, ScreenModel, ScreenState};

const NOTIFICATION_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Notifications Unavailable", "Failed to load notifications");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationNavigation {
    OrderDetail(String),
}

pub struct NotificationsModel {
    screen: ScreenModel<NotificationListResponse>,
    api: SharedApi,
    navigation: Signal<NotificationNavigation>,
}

impl NotificationsModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            screen: ScreenModel::new("notifications", NOTIFICATION_ERRORS),
            api,
            navigation: Signal::new(),
        }
    }

    pub fn state(&self) -> ScreenState<NotificationListResponse> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<NotificationListResponse>> {
        self.screen.subscribe()
    }

    pub fn navigation(&self) -> mpsc::UnboundedReceiver<NotificationNavigation> {
        self.navigation.subscribe()
    }

    pub fn load(&self) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        self.screen
            .load(async move { safe_call(api.get_notifications()).await })
    }

    /// Mark `notification` read, refresh the list, then open its order.
    pub fn read(&self, notification: &Notification) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        let id = notification.id.clone();
        let order_id = notification.order_id.clone();
        let navigation = self.navigation.clone();

        self.screen.load_then(
            async move { ApiResult::from(mark_read_and_refresh(api, id).await) },
            move |_| {
                if let Some(order_id) = order_id {
                    navigation.emit(NotificationNavigation::OrderDetail(order_id));
                }
            },
        )
    }

    /// Register this device for push delivery. Does not touch screen state.
    pub async fn register_device_token(
        &self,
        token: impl Into<String>,
    ) -> ApiResult<GenericMsgResponse> {
        let request = DeviceTokenRequest {
            token: token.into(),
        };
        safe_call(self.api.update_device_token(&request)).await
    }

    pub fn close(&self) {
        self.screen.close();
    }
}

async fn mark_read_and_refresh(
    api: SharedApi,
    id: String,
) -> Result<NotificationListResponse, CallFailure> {
    safe_call(api.read_notification(&id)).await.into_result()?;
    safe_call(api.get_notifications()).await.into_result()
}
