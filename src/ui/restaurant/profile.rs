use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::models::Restaurant;
use crate::api::{safe_call, SharedApi};
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ScreenModel, ScreenState};

const PROFILE_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Profile Unavailable", "Failed to load your restaurant").with_entries(&[
        ErrorEntry {
            code: 404,
            title: "No Restaurant",
            description: "This account does not own a restaurant.",
        },
    ]);

/// The signed-in owner's restaurant.
pub struct RestaurantProfileModel {
    screen: ScreenModel<Restaurant>,
    api: SharedApi,
}

impl RestaurantProfileModel {
    pub fn new(api: SharedApi) -> Self {
        Self {
            screen: ScreenModel::new("restaurant_profile", PROFILE_ERRORS),
            api,
        }
    }

    pub fn state(&self) -> ScreenState<Restaurant> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Restaurant>> {
        self.screen.subscribe()
    }

    pub fn load(&self) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        self.screen
            .load(async move { safe_call(api.get_restaurant_profile()).await })
    }

    pub fn close(&self) {
        self.screen.close();
    }
}
