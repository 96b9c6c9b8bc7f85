/// Integration tests for nova-apns-payload
///
/// This test module covers:
/// - Setter validation for alerts and messages
/// - Alert wire form (plain text vs. object)
/// - Payload assembly and JSON encoding
use nova_apns_payload::{
    Alert, AlertPayload, ApnsPayloadConfig, JsonEncoding, Message, PayloadError,
};
use serde_json::{json, Map, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("nova_apns_payload=debug")
        .with_test_writer()
        .try_init();
}

fn assert_invalid<T: std::fmt::Debug>(result: Result<T, PayloadError>) {
    match result {
        Err(err) => assert!(err.is_invalid_argument(), "unexpected error: {}", err),
        Ok(value) => panic!("expected invalid argument, got {:?}", value),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn full_alert() -> Alert {
    Alert::new(
        Some("Foo wants to play Bar!".into()),
        Some("PLAY".into()),
        Some("GAME_PLAY_REQUEST_FORMAT".into()),
        Some(strings(&["Foo", "Baz"])),
        Some("Default.png".into()),
        Some("Alert".into()),
        Some("ALERT".into()),
        Some(strings(&["Foo", "Baz"])),
    )
}

#[test]
fn test_set_alert_text_returns_alert() {
    let mut message = Message::new();
    message.set_alert("my alert");
    let alert = message.alert().expect("alert should be set");
    assert_eq!(alert.body(), Some("my alert"));
}

#[test]
fn test_set_alert_rejects_non_string() {
    init_tracing();
    let mut message = Message::new();
    assert_invalid(message.try_set_alert(&json!([])));
    assert_invalid(message.try_set_alert(&json!(true)));
}

#[test]
fn test_alert_setters_reject_non_string() {
    let mut alert = Alert::default();
    assert_invalid(alert.try_set_action_loc_key(&json!([])));
    assert_invalid(alert.try_set_loc_key(&json!([])));
    assert_invalid(alert.try_set_launch_image(&json!([])));
    assert_invalid(alert.try_set_title(&json!([])));
    assert_invalid(alert.try_set_title_loc_key(&json!([])));
}

#[test]
fn test_badge() {
    let mut message = Message::new();
    message.set_badge(Some(5));
    assert_eq!(message.badge(), Some(5));

    message.set_badge(None);
    assert_eq!(message.badge(), Some(0));

    message.try_set_badge(&Value::Null).unwrap();
    assert_eq!(message.badge(), Some(0));

    message.try_set_badge(&json!(7.0)).unwrap();
    assert_eq!(message.badge(), Some(7));

    assert_invalid(message.try_set_badge(&json!("string!")));
}

#[test]
fn test_mutable_content() {
    let mut message = Message::new();
    message.set_mutable_content(Some(1));
    assert_eq!(message.mutable_content(), Some(1));

    message.try_set_mutable_content(&Value::Null).unwrap();
    assert_eq!(message.mutable_content(), Some(0));

    assert_invalid(message.try_set_mutable_content(&json!("string!")));
}

#[test]
fn test_expire() {
    let mut message = Message::new();
    message.set_expire(100);
    assert_eq!(message.expire(), Some(100));

    message.try_set_expire(&json!(200)).unwrap();
    assert_eq!(message.expire(), Some(200));

    assert_invalid(message.try_set_expire(&json!("sting!")));
    assert_invalid(message.try_set_expire(&Value::Null));
}

#[test]
fn test_sound() {
    let mut message = Message::new();
    message.set_sound("test");
    assert_eq!(message.sound(), Some("test"));

    assert_invalid(message.try_set_sound(&json!([])));
    assert_invalid(message.try_set_sound(&json!(12345)));
    assert_eq!(message.sound(), Some("test"));
}

#[test]
fn test_category() {
    let mut message = Message::new();
    message.set_category("test");
    assert_eq!(message.category(), Some("test"));

    assert_invalid(message.try_set_category(&json!([])));
    assert_invalid(message.try_set_category(&json!(12345)));
}

#[test]
fn test_content_available() {
    let mut message = Message::new();
    assert_invalid(message.try_set_content_available(&json!("string")));
    assert_invalid(message.try_set_content_available(&json!("1")));

    message.try_set_content_available(&json!(1)).unwrap();
    assert_eq!(message.content_available(), Some(1));

    let payload = message.payload();
    assert_eq!(payload["aps"]["content-available"], json!(1));
}

#[test]
fn test_url_args() {
    let mut message = Message::new();
    message.set_url_args(strings(&["path/to/somewhere"]));
    assert_eq!(message.url_args(), Some(&strings(&["path/to/somewhere"])[..]));
}

#[test]
fn test_custom_data() {
    let mut data = Map::new();
    data.insert("key".to_string(), json!("val"));
    data.insert("key2".to_string(), json!([1, 2, 3, 4, 5]));

    let mut message = Message::new();
    message.set_custom(data.clone());
    assert_eq!(message.custom(), Some(&data));
}

#[test]
fn test_alert_constructor() {
    let alert = full_alert();
    assert_eq!(alert.body(), Some("Foo wants to play Bar!"));
    assert_eq!(alert.action_loc_key(), Some("PLAY"));
    assert_eq!(alert.loc_key(), Some("GAME_PLAY_REQUEST_FORMAT"));
    assert_eq!(alert.loc_args(), Some(&strings(&["Foo", "Baz"])[..]));
    assert_eq!(alert.launch_image(), Some("Default.png"));
    assert_eq!(alert.title(), Some("Alert"));
    assert_eq!(alert.title_loc_key(), Some("ALERT"));
    assert_eq!(alert.title_loc_args(), Some(&strings(&["Foo", "Baz"])[..]));
}

#[test]
fn test_alert_payload_has_every_key() {
    let payload = full_alert().payload();
    let fields = payload.as_fields().expect("full alert should be an object");
    for key in [
        "body",
        "action-loc-key",
        "loc-key",
        "loc-args",
        "launch-image",
        "title",
        "title-loc-key",
        "title-loc-args",
    ] {
        assert!(fields.contains_key(key), "missing key {}", key);
    }
}

#[test]
fn test_alert_payload_sends_only_body() {
    let alert = Alert::new(
        Some("Foo wants Bar".into()),
        None,
        None,
        None,
        None,
        None,
        None,
        None,
    );
    assert_eq!(alert.payload(), AlertPayload::Text("Foo wants Bar".to_string()));
}

#[test]
fn test_payload_json_formed_correctly() {
    let mut message = Message::new();
    message
        .set_alert("hi=привет")
        .set_id("00000000-0000-0000-0000-000000000000")
        .set_expire(100)
        .set_token("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef");

    assert_eq!(
        Value::Object(message.payload()),
        json!({"aps": {"alert": "hi=привет"}})
    );
    assert_eq!(
        message.payload_json(&ApnsPayloadConfig::default()).unwrap(),
        r#"{"aps":{"alert":"hi=\u043f\u0440\u0438\u0432\u0435\u0442"}}"#
    );
    assert_eq!(
        message
            .payload_json(&ApnsPayloadConfig::default().with_encoding(JsonEncoding::Utf8))
            .unwrap(),
        r#"{"aps":{"alert":"hi=привет"}}"#
    );
}

#[test]
fn test_custom_data_payload_does_not_include_empty_aps() {
    let mut message = Message::new();
    message.try_set_custom(&json!({"custom": "data"})).unwrap();

    let payload = message.payload();
    assert!(!payload.contains_key("aps"));
    assert_eq!(Value::Object(payload), json!({"custom": "data"}));
}
