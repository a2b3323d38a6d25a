mod common;

use common::{order_json, FakeFoodApi};
use foodhub::api::models::{ImageUpload, OrderStatus};
use foodhub::ui::restaurant::{
    AddMenuItemModel, MenuEvent, MenuModel, RestaurantOrderDetailsModel, RestaurantOrdersModel,
    RestaurantProfileModel,
};
use foodhub::ui::screen::ScreenState;
use std::time::Duration;

#[tokio::test]
async fn pending_orders_empty_is_success() {
    let fake = FakeFoodApi::new();
    fake.reply("get_restaurant_orders", 200, r#"{"orders":[]}"#);
    let model = RestaurantOrdersModel::new(fake.shared());

    let task = model.fetch_by_status(OrderStatus::Pending);
    assert_eq!(model.state(), ScreenState::Loading);
    task.await.unwrap();

    assert_eq!(model.state(), ScreenState::Success(vec![]));
    assert_eq!(fake.calls()[0].args, vec!["PENDING".to_string()]);
}

#[tokio::test]
async fn order_types_list_every_status() {
    let fake = FakeFoodApi::new();
    let model = RestaurantOrdersModel::new(fake.shared());

    let types = model.order_types();
    assert_eq!(types.len(), OrderStatus::ALL.len());
    assert_eq!(types.first(), Some(&"PENDING"));
    assert!(types.contains(&"OUT_FOR_DELIVERY"));
}

#[tokio::test]
async fn refresh_reuses_selected_status() {
    let fake = FakeFoodApi::new();
    fake.reply("get_restaurant_orders", 200, r#"{"orders":[]}"#);
    let body = format!(r#"{{"orders":[{}]}}"#, order_json("o-3", "READY"));
    fake.reply("get_restaurant_orders", 200, &body);
    let model = RestaurantOrdersModel::new(fake.shared());

    model.fetch_by_status(OrderStatus::Ready).await.unwrap();
    model.refresh().await.unwrap();

    assert_eq!(model.status().get(), OrderStatus::Ready);
    assert_eq!(fake.calls()[1].args, vec!["READY".to_string()]);
    assert_eq!(model.state().payload().map(Vec::len), Some(1));
}

#[tokio::test]
async fn switching_tabs_drops_slow_previous_tab_result() {
    let fake = FakeFoodApi::new();
    let pending = format!(r#"{{"orders":[{}]}}"#, order_json("o-pending", "PENDING"));
    fake.reply_after("get_restaurant_orders", 200, &pending);
    fake.reply("get_restaurant_orders", 200, r#"{"orders":[]}"#);
    let model = RestaurantOrdersModel::new(fake.shared());

    let slow = model.fetch_by_status(OrderStatus::Pending);
    tokio::time::sleep(Duration::from_millis(20)).await;
    model.fetch_by_status(OrderStatus::Delivered).await.unwrap();
    assert_eq!(model.state(), ScreenState::Success(vec![]));

    slow.await.unwrap();
    assert_eq!(model.status().get(), OrderStatus::Delivered);
    assert_eq!(model.state(), ScreenState::Success(vec![]));
}

#[tokio::test]
async fn accept_patches_status_then_reloads() {
    let fake = FakeFoodApi::new();
    fake.reply("update_order_status", 200, r#"{"message":"updated"}"#);
    fake.reply("get_order_details", 200, &order_json("o-1", "ACCEPTED"));
    let model = RestaurantOrderDetailsModel::new(fake.shared(), "o-1");

    model.accept().await.unwrap();

    assert_eq!(
        fake.endpoints(),
        vec!["update_order_status", "get_order_details"]
    );
    let body: serde_json::Value = serde_json::from_str(&fake.calls()[0].args[1]).unwrap();
    assert_eq!(body["status"], "ACCEPTED");
    assert_eq!(
        model.state().payload().map(|o| o.status),
        Some(OrderStatus::Accepted)
    );
}

#[tokio::test]
async fn rejected_transition_reports_conflict() {
    let fake = FakeFoodApi::new();
    fake.reply("update_order_status", 409, r#"{"message":"Order already delivered"}"#);
    let model = RestaurantOrderDetailsModel::new(fake.shared(), "o-1");

    model.reject().await.unwrap();

    let error = model.state().error().cloned().unwrap();
    assert_eq!(error.title, "Status Not Allowed");
    assert_eq!(fake.endpoints(), vec!["update_order_status"]);
}

#[tokio::test]
async fn profile_and_menu_load() {
    let fake = FakeFoodApi::new();
    fake.reply(
        "get_restaurant_profile",
        200,
        r#"{"id":"r-1","name":"Thai Corner","address":"1 Main St","latitude":1.0,"longitude":2.0}"#,
    );
    fake.reply(
        "get_restaurant_menu",
        200,
        r#"{"foodItems":[{"id":"m-1","name":"Pad Thai","description":"Noodles","price":12.25}]}"#,
    );

    let profile = RestaurantProfileModel::new(fake.shared());
    profile.load().await.unwrap();
    let restaurant = profile.state().payload().cloned().unwrap();

    let menu = MenuModel::new(fake.shared(), restaurant.id);
    menu.load().await.unwrap();

    assert_eq!(menu.state().payload().unwrap()[0].name, "Pad Thai");
    assert_eq!(fake.calls()[1].args, vec!["r-1".to_string()]);
}

#[tokio::test]
async fn add_menu_item_uploads_image_first() {
    let fake = FakeFoodApi::new();
    fake.reply("upload_image", 200, r#"{"url":"https://cdn/dish.png"}"#);
    fake.reply("add_restaurant_menu", 201, r#"{"message":"created"}"#);
    let model = AddMenuItemModel::new(fake.shared(), "r-1");
    let mut events = model.events();
    model.on_name_change("Green Curry");
    model.on_description_change("Spicy");
    model.on_price_change("14.00");
    model.on_image_selected(ImageUpload {
        file_name: "dish.png".into(),
        content_type: "image/png".into(),
        bytes: vec![1, 2, 3],
    });

    model.submit().await.unwrap();

    assert_eq!(fake.endpoints(), vec!["upload_image", "add_restaurant_menu"]);
    let item: serde_json::Value = serde_json::from_str(&fake.calls()[1].args[1]).unwrap();
    assert_eq!(item["name"], "Green Curry");
    assert_eq!(item["price"], 14.0);
    assert_eq!(item["imageUrl"], "https://cdn/dish.png");
    assert_eq!(events.try_recv().unwrap(), MenuEvent::MenuItemAdded);
}

#[tokio::test]
async fn failed_upload_skips_item_creation() {
    let fake = FakeFoodApi::new();
    fake.reply("upload_image", 413, r#"{"message":"File too large"}"#);
    let model = AddMenuItemModel::new(fake.shared(), "r-1");
    let mut events = model.events();
    model.on_name_change("Green Curry");
    model.on_price_change("14");
    model.on_image_selected(ImageUpload {
        file_name: "huge.png".into(),
        content_type: "image/png".into(),
        bytes: vec![0; 16],
    });

    model.submit().await.unwrap();

    assert_eq!(fake.endpoints(), vec!["upload_image"]);
    assert_eq!(
        model.state().error().map(|e| e.title.as_str()),
        Some("Image Too Large")
    );
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn invalid_price_never_reaches_backend() {
    let fake = FakeFoodApi::new();
    let model = AddMenuItemModel::new(fake.shared(), "r-1");
    model.on_name_change("Green Curry");
    model.on_price_change("free");

    model.submit().await.unwrap();

    assert!(fake.calls().is_empty());
    assert_eq!(
        model.state().error().map(|e| e.description.as_str()),
        Some("Enter a valid price")
    );
}
