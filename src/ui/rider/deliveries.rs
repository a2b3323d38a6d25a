use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::models::{DeliveryItem, GenericMsgResponse, RiderDeliveryOrder};
use crate::api::{safe_call, ApiCall, ApiResult, CallFailure, SharedApi};
use crate::ui::mvi::Observable;
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ScreenModel, ScreenState};

const DELIVERY_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Deliveries Unavailable", "Failed to load deliveries").with_entries(&[
        ErrorEntry {
            code: 404,
            title: "Delivery Not Found",
            description: "This delivery is no longer available.",
        },
        ErrorEntry {
            code: 409,
            title: "Already Taken",
            description: "Another rider accepted this delivery.",
        },
    ]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryTab {
    #[default]
    Available,
    Active,
}

/// Contents of the selected tab.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryList {
    Available(Vec<DeliveryItem>),
    Active(Vec<RiderDeliveryOrder>),
}

impl DeliveryList {
    pub fn is_empty(&self) -> bool {
        match self {
            DeliveryList::Available(items) => items.is_empty(),
            DeliveryList::Active(orders) => orders.is_empty(),
        }
    }
}

pub struct DeliveriesModel {
    screen: ScreenModel<DeliveryList>,
    api: SharedApi,
    tab: Observable<DeliveryTab>,
}

impl DeliveriesModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            screen: ScreenModel::new("deliveries", DELIVERY_ERRORS),
            api,
            tab: Observable::default(),
        }
    }

    pub fn state(&self) -> ScreenState<DeliveryList> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<DeliveryList>> {
        self.screen.subscribe()
    }

    pub fn tab(&self) -> &Observable<DeliveryTab> {
        &self.tab
    }

    /// Select `tab` and load its list.
    pub fn fetch(&self, tab: DeliveryTab) -> JoinHandle<()> {
        self.tab.set(tab);
        let api = SharedApi::clone(&self.api);
        self.screen.load(async move { ApiResult::from(fetch_tab(&api, tab).await) })
    }

    pub fn accept(&self, order_id: impl Into<String>) -> JoinHandle<()> {
        self.act(order_id.into(), Action::Accept)
    }

    pub fn reject(&self, order_id: impl Into<String>) -> JoinHandle<()> {
        self.act(order_id.into(), Action::Reject)
    }

    /// Both actions end on the refreshed available tab.
    fn act(&self, order_id: String, action: Action) -> JoinHandle<()> {
        self.tab.set(DeliveryTab::Available);
        let api = SharedApi::clone(&self.api);
        self.screen.load(async move {
            ApiResult::from(act_and_refresh(api, order_id, action).await)
        })
    }

    pub fn close(&self) {
        self.screen.close();
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Accept,
    Reject,
}

async fn fetch_tab(api: &SharedApi, tab: DeliveryTab) -> Result<DeliveryList, CallFailure> {
    Ok(match tab {
        DeliveryTab::Available => DeliveryList::Available(
            safe_call(api.get_available_deliveries())
                .await
                .into_result()?
                .data,
        ),
        DeliveryTab::Active => DeliveryList::Active(
            safe_call(api.get_active_deliveries())
                .await
                .into_result()?
                .data,
        ),
    })
}

async fn act_and_refresh(
    api: SharedApi,
    order_id: String,
    action: Action,
) -> Result<DeliveryList, CallFailure> {
    let call: ApiCall<GenericMsgResponse> = match action {
        Action::Accept => api.accept_delivery(&order_id).await,
        Action::Reject => api.reject_delivery(&order_id).await,
    };
    safe_call(async { call }).await.into_result()?;
    fetch_tab(&api, DeliveryTab::Available).await
}
