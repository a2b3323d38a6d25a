mod common;

use common::FakeFoodApi;
use foodhub::ui::notifications::{NotificationNavigation, NotificationsModel};

const INBOX: &str = r#"{
    "notifications":[{"id":"n-1","title":"Order ready","message":"Pick it up","orderId":"o-7","type":"ORDER","isRead":false}],
    "unreadCount":1
}"#;

const INBOX_READ: &str = r#"{
    "notifications":[{"id":"n-1","title":"Order ready","message":"Pick it up","orderId":"o-7","type":"ORDER","isRead":true}],
    "unreadCount":0
}"#;

#[tokio::test]
async fn read_marks_refreshes_and_opens_order() {
    let fake = FakeFoodApi::new();
    fake.reply("get_notifications", 200, INBOX);
    fake.reply("read_notification", 200, r#"{"message":"ok"}"#);
    fake.reply("get_notifications", 200, INBOX_READ);
    let model = NotificationsModel::new(fake.shared());
    let mut navigation = model.navigation();

    model.load().await.unwrap();
    let inbox = model.state().payload().cloned().unwrap();
    assert_eq!(inbox.unread_count, 1);

    model.read(&inbox.notifications[0]).await.unwrap();

    assert_eq!(
        fake.endpoints(),
        vec!["get_notifications", "read_notification", "get_notifications"]
    );
    assert_eq!(model.state().payload().unwrap().unread_count, 0);
    assert_eq!(
        navigation.try_recv().unwrap(),
        NotificationNavigation::OrderDetail("o-7".into())
    );
}

#[tokio::test]
async fn device_token_registration_leaves_state_alone() {
    let fake = FakeFoodApi::new();
    fake.reply("update_device_token", 200, r#"{"message":"ok"}"#);
    let model = NotificationsModel::new(fake.shared());

    let result = model.register_device_token("fcm-abc").await;

    assert!(result.is_success());
    assert_eq!(model.state(), foodhub::ui::screen::ScreenState::Nothing);
    let body: serde_json::Value = serde_json::from_str(&fake.calls()[0].args[0]).unwrap();
    assert_eq!(body["token"], "fcm-abc");
}
