use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::models::{Category, Restaurant};
use crate::api::{safe_call, ApiResult, CallFailure, SharedApi};
use crate::ui::screen::{ErrorCatalog, ScreenModel, ScreenState};

const HOME_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Nothing to Show", "Failed to load restaurants near you");

/// Everything the home screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    pub categories: Vec<Category>,
    pub restaurants: Vec<Restaurant>,
}

pub struct HomeModel {
    screen: ScreenModel<HomeFeed>,
    api: SharedApi,
}

impl HomeModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            screen: ScreenModel::new("home", HOME_ERRORS),
            api,
        }
    }

    pub fn state(&self) -> ScreenState<HomeFeed> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<HomeFeed>> {
        self.screen.subscribe()
    }

    /// Categories first, then restaurants around `(lat, lon)`. The first
    /// failure ends the load.
    pub fn load(&self, lat: f64, lon: f64) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        self.screen
            .load(async move { ApiResult::from(fetch_feed(api, lat, lon).await) })
    }

    pub fn close(&self) {
        self.screen.close();
    }
}

async fn fetch_feed(api: SharedApi, lat: f64, lon: f64) -> Result<HomeFeed, CallFailure> {
    let categories = safe_call(api.get_categories()).await.into_result()?.data;
    let restaurants = safe_call(api.get_restaurants(lat, lon))
        .await
        .into_result()?
        .data;
    Ok(HomeFeed {
        categories,
        restaurants,
    })
}
