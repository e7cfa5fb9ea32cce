use super::*;
use crate::test_helpers::MockTransport;
use serde_json::json;

#[test]
fn path_helpers_format_expected_paths() {
    assert_eq!(user_path("u123"), "/users/u123");
    assert_eq!(notification_read_path("n9"), "/notifications/n9/read");
    assert_eq!(leaderboard_path("c1"), "/courses/c1/leaderboard");
}

#[test]
fn path_helpers_encode_ids_as_single_segments() {
    assert_eq!(path_segment("a b+c"), "a%20b%2Bc");
    assert_eq!(user_path("../admin"), "/users/..%2Fadmin");
    assert_eq!(notification_read_path("n?1#x"), "/notifications/n%3F1%23x/read");
    assert_eq!(leaderboard_path("c 1"), "/courses/c%201/leaderboard");
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(request_failed_message(502), "Request failed with status 502");
}

#[test]
fn envelope_message_prefers_message_then_error() {
    assert_eq!(envelope_message(&json!({ "message": "Invalid OTP" })).as_deref(), Some("Invalid OTP"));
    assert_eq!(envelope_message(&json!({ "error": "Too many requests" })).as_deref(), Some("Too many requests"));
    assert_eq!(envelope_message(&json!("Bad Gateway")).as_deref(), Some("Bad Gateway"));
    assert_eq!(envelope_message(&json!({ "message": "  " })), None);
    assert_eq!(envelope_message(&json!({ "message": 5 })), None);
    assert_eq!(envelope_message(&Value::Null), None);
}

#[test]
fn http_error_falls_back_to_status_text() {
    assert_eq!(
        http_error(500, &Value::Null),
        AuthError::Http { status: 500, message: "Request failed with status 500".to_owned() }
    );
}

#[test]
fn endpoint_joins_base_and_path() {
    let api = ApiClient::new(MockTransport::new(), "https://api.test/v1/");
    assert_eq!(api.base_url(), "https://api.test/v1");
    assert_eq!(api.endpoint("/auth/login"), "https://api.test/v1/auth/login");
    assert_eq!(api.endpoint("courses"), "https://api.test/v1/courses");
}

#[test]
fn parse_body_handles_empty_and_plain_text() {
    use crate::net::transport::parse_body;
    assert_eq!(parse_body(""), Value::Null);
    assert_eq!(parse_body("{\"a\":1}"), json!({ "a": 1 }));
    assert_eq!(parse_body("oops"), json!("oops"));
}

#[tokio::test]
async fn request_sends_bearer_and_body() {
    let transport = MockTransport::new();
    transport.respond(200, json!({ "ok": true }));
    let api = ApiClient::new(transport.clone(), "https://api.test");

    let body = api.post("/support-tickets", Some("tok"), json!({ "subject": "x" })).await.unwrap();
    assert_eq!(body, json!({ "ok": true }));

    let sent = transport.last_request();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "https://api.test/support-tickets");
    assert_eq!(sent.bearer.as_deref(), Some("tok"));
    assert_eq!(sent.body, Some(json!({ "subject": "x" })));
}

#[tokio::test]
async fn non_success_status_becomes_http_error() {
    let transport = MockTransport::new();
    transport.respond(400, json!({ "message": "Phone already registered" }));
    let api = ApiClient::new(transport, "https://api.test");

    let err = api.get("/users/me", None).await.unwrap_err();
    assert_eq!(err, AuthError::Http { status: 400, message: "Phone already registered".to_owned() });
}

#[tokio::test]
async fn transport_failure_propagates() {
    let transport = MockTransport::new();
    transport.fail(AuthError::Network("connection refused".to_owned()));
    let api = ApiClient::new(transport, "https://api.test");

    let err = api.get("/users/me", None).await.unwrap_err();
    assert_eq!(err, AuthError::Network("connection refused".to_owned()));
}
