mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use urlzip::config::ServiceSettings;
use urlzip::domain::entities::UrlRecord;
use urlzip::domain::repositories::{CreateOutcome, IncrementOutcome, RecordStore};
use urlzip::error::AppError;
use urlzip::infrastructure::rendering::QrPngRenderer;
use urlzip::routes::app_router;
use urlzip::state::AppState;

/// Store whose backend is unreachable.
struct DownStore;

#[async_trait]
impl RecordStore for DownStore {
    async fn get_record(&self, _code: &str) -> Result<Option<UrlRecord>, AppError> {
        Err(AppError::internal("Store error", json!({})))
    }

    async fn create_if_absent(&self, _record: &UrlRecord) -> Result<CreateOutcome, AppError> {
        Err(AppError::internal("Store error", json!({})))
    }

    async fn increment_clicks(&self, _code: &str) -> Result<IncrementOutcome, AppError> {
        Err(AppError::internal("Store error", json!({})))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

fn down_server() -> TestServer {
    let state = AppState::new(
        Arc::new(DownStore),
        Arc::new(QrPngRenderer::new()),
        ServiceSettings::new(common::BASE_URL),
    );

    TestServer::new(app_router(state, None, false).unwrap()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _store) = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["store"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let server = down_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let server = down_server();

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
}

#[tokio::test]
async fn test_shorten_store_failure_is_internal_error() {
    let server = down_server();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
