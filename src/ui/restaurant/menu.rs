use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::models::{FoodItem, GenericMsgResponse, ImageUpload};
use crate::api::{safe_call, ApiResult, CallFailure, SharedApi, GENERIC_ERROR_CODE};
use crate::ui::mvi::{Observable, Signal};
use crate::ui::screen::{ErrorCatalog, ErrorEntry, ErrorMessage, ScreenModel, ScreenState};

const MENU_ERRORS: ErrorCatalog = ErrorCatalog::new("Menu Unavailable", "Failed to load the menu");

const ADD_ITEM_ERRORS: ErrorCatalog =
    ErrorCatalog::new("Item Not Added", "Failed to add the menu item").with_entries(&[
        ErrorEntry {
            code: 400,
            title: "Invalid Item",
            description: "Please check the item details.",
        },
        ErrorEntry {
            code: 413,
            title: "Image Too Large",
            description: "Please choose a smaller image.",
        },
    ]);

/// Menu of the owner's restaurant.
pub struct MenuModel {
    screen: ScreenModel<Vec<FoodItem>>,
    api: SharedApi,
    restaurant_id: String,
}

impl MenuModel {
    pub fn new(api: SharedApi, restaurant_id: impl Into<String>) -> Self {
        Self {
            screen: ScreenModel::new("menu", MENU_ERRORS),
            api,
            restaurant_id: restaurant_id.into(),
        }
    }

    pub fn state(&self) -> ScreenState<Vec<FoodItem>> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<FoodItem>>> {
        self.screen.subscribe()
    }

    pub fn load(&self) -> JoinHandle<()> {
        let api = SharedApi::clone(&self.api);
        let restaurant_id = self.restaurant_id.clone();
        self.screen.load(async move {
            safe_call(api.get_restaurant_menu(&restaurant_id))
                .await
                .map(|menu| menu.food_items)
        })
    }

    pub fn close(&self) {
        self.screen.close();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    MenuItemAdded,
}

/// Form for a new menu item.
pub struct AddMenuItemModel {
    screen: ScreenModel<GenericMsgResponse>,
    api: SharedApi,
    restaurant_id: String,
    name: Observable<String>,
    description: Observable<String>,
    price: Observable<String>,
    image: Observable<Option<ImageUpload>>,
    events: Signal<MenuEvent>,
}

impl AddMenuItemModel {
    pub fn new(api: SharedApi, restaurant_id: impl Into<String>) -> Self {
        Self {
            screen: ScreenModel::new("add_menu_item", ADD_ITEM_ERRORS),
            api,
            restaurant_id: restaurant_id.into(),
            name: Observable::default(),
            description: Observable::default(),
            price: Observable::default(),
            image: Observable::new(None),
            events: Signal::new(),
        }
    }

    pub fn state(&self) -> ScreenState<GenericMsgResponse> {
        self.screen.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<GenericMsgResponse>> {
        self.screen.subscribe()
    }

    pub fn events(&self) -> mpsc::UnboundedReceiver<MenuEvent> {
        self.events.subscribe()
    }

    pub fn on_name_change(&self, name: impl Into<String>) {
        self.name.set(name.into());
    }

    pub fn on_description_change(&self, description: impl Into<String>) {
        self.description.set(description.into());
    }

    /// Raw text; parsed on submit.
    pub fn on_price_change(&self, price: impl Into<String>) {
        self.price.set(price.into());
    }

    pub fn on_image_selected(&self, image: ImageUpload) {
        self.image.set(Some(image));
    }

    pub fn clear_image(&self) {
        self.image.set(None);
    }

    /// Upload the image if one is selected, then create the item.
    pub fn submit(&self) -> JoinHandle<()> {
        let name = self.name.get();
        let price = match parse_price(&self.price.get()) {
            Ok(price) if !name.trim().is_empty() => price,
            Ok(_) => return self.reject_input("Name is required", "empty name"),
            Err(cause) => return self.reject_input("Enter a valid price", &cause),
        };

        let item = FoodItem {
            id: None,
            restaurant_id: Some(self.restaurant_id.clone()),
            name: name.trim().to_string(),
            description: self.description.get(),
            price,
            image_url: None,
            ar_model_url: None,
        };
        let api = SharedApi::clone(&self.api);
        let restaurant_id = self.restaurant_id.clone();
        let image = self.image.get();
        let events = self.events.clone();

        self.screen.load_then(
            async move { ApiResult::from(upload_and_add(api, restaurant_id, item, image).await) },
            move |_| {
                events.emit(MenuEvent::MenuItemAdded);
            },
        )
    }

    fn reject_input(&self, description: &str, cause: &str) -> JoinHandle<()> {
        self.screen.reject(ErrorMessage {
            code: GENERIC_ERROR_CODE,
            title: "Invalid Item".to_string(),
            description: description.to_string(),
            cause: cause.to_string(),
        })
    }

    pub fn close(&self) {
        self.screen.close();
    }
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("price '{}': {}", raw, e))?;
    if !price.is_finite() || price <= 0.0 {
        return Err(format!("price '{}' must be positive", raw));
    }
    Ok(price)
}

async fn upload_and_add(
    api: SharedApi,
    restaurant_id: String,
    mut item: FoodItem,
    image: Option<ImageUpload>,
) -> Result<GenericMsgResponse, CallFailure> {
    if let Some(image) = image {
        let uploaded = safe_call(api.upload_image(image)).await.into_result()?;
        item.image_url = Some(uploaded.url);
    }
    safe_call(api.add_restaurant_menu(&restaurant_id, &item))
        .await
        .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_decimal_text() {
        assert_eq!(parse_price(" 12.50 "), Ok(12.5));
    }

    #[test]
    fn price_rejects_non_positive_and_garbage() {
        assert!(parse_price("0").is_err());
        assert!(parse_price("-3").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("NaN").is_err());
    }
}
