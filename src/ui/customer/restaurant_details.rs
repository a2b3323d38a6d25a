use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::models::FoodItem;
use crate::api::{safe_call, SharedApi};
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ScreenModel, ScreenState};

const MENU_ERRORS: ErrorCatalog = ErrorCatalog::new("Menu Unavailable", "Failed to load the menu")
    .with_entries(&[ErrorEntry {
        code: 404,
        title: "Restaurant Not Found",
        description: "This restaurant is no longer available.",
    }]);

/// Menu of one restaurant. An empty list is a normal `Success`.
pub struct RestaurantDetailsModel {
    screen: ScreenModel<Vec<FoodItem>>,
    api: SharedApi,
    restaurant_id: String,
}

impl RestaurantDetailsModel {
    pub fn new(api: SharedApi, restaurant_id: impl Into<String>) -> Self {
        Self {
            screen: ScreenModel::new("restaurant_details", MENU_ERRORS),
            api,
            restaurant_id: restaurant_id.into(),
        }
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    pub fn state(&self) -> ScreenState<Vec<FoodItem>> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<FoodItem>>> {
        self.screen.subscribe()
    }

    pub fn load(&self) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        let id = self.restaurant_id.clone();
        self.screen.load(async move {
            safe_call(api.get_food_items_for_restaurant(&id))
                .await
                .map(|menu| menu.food_items)
        })
    }

    pub fn close(&self) {
        self.screen.close();
    }
}
