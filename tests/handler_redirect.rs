mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_redirect_success() {
    let (server, store) = common::create_test_server();
    common::create_test_record(&store, "abc123", "https://example.com/target").await;

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let (server, store) = common::create_test_server();
    common::create_test_record(&store, "clickme", "https://example.com").await;

    for _ in 0..3 {
        let response = server.get("/clickme").await;
        assert_eq!(response.status_code(), StatusCode::FOUND);
    }

    assert_eq!(common::clicks(&store, "clickme").await, 3);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/nothere").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_expired() {
    let (server, store) = common::create_test_server();
    common::create_expired_record(&store, "old", "https://example.com").await;

    let response = server.get("/old").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_preserves_query_string() {
    let (server, store) = common::create_test_server();
    common::create_test_record(&store, "q", "https://example.com/search?q=rust&page=2").await;

    let response = server.get("/q").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        "https://example.com/search?q=rust&page=2"
    );
}

#[tokio::test]
async fn test_redirect_non_ascii_target_is_percent_encoded() {
    let (server, store) = common::create_test_server();
    common::create_test_record(&store, "intl", "https://example.com/café").await;

    let response = server.get("/intl").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/caf%C3%A9");
}
