mod common;

use axum::http::Method;
use serde_json::json;

#[tokio::test]
async fn test_preflight_shorten() {
    let (server, _store) = common::create_test_server();

    let response = server
        .method(Method::OPTIONS, "/shorten")
        .add_header("origin", "https://app.example.org")
        .add_header("access-control-request-method", "POST")
        .add_header("access-control-request-headers", "content-type")
        .await;

    response.assert_status_ok();
    assert!(response.as_bytes().is_empty());
    assert_eq!(response.header("access-control-allow-origin"), "*");

    let methods = response.header("access-control-allow-methods");
    assert!(methods.to_str().unwrap().contains("POST"));
}

#[tokio::test]
async fn test_preflight_code_image() {
    let (server, _store) = common::create_test_server();

    let response = server
        .method(Method::OPTIONS, "/abc123/qr")
        .add_header("origin", "https://app.example.org")
        .add_header("access-control-request-method", "GET")
        .await;

    response.assert_status_ok();
    assert!(response.as_bytes().is_empty());
}

#[tokio::test]
async fn test_bare_options_returns_ok() {
    let (server, _store) = common::create_test_server();

    let response = server.method(Method::OPTIONS, "/shorten").await;

    response.assert_status_ok();
    assert!(response.as_bytes().is_empty());
}

#[tokio::test]
async fn test_cors_header_on_success() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/shorten")
        .add_header("origin", "https://app.example.org")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_cors_header_on_error() {
    let (server, _store) = common::create_test_server();

    let response = server
        .get("/missing")
        .add_header("origin", "https://app.example.org")
        .await;

    response.assert_status_not_found();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}
