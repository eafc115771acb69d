#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use std::sync::Arc;
use urlzip::config::ServiceSettings;
use urlzip::domain::entities::UrlRecord;
use urlzip::domain::repositories::RecordStore;
use urlzip::infrastructure::persistence::MemoryRecordStore;
use urlzip::infrastructure::rendering::QrPngRenderer;
use urlzip::routes::app_router;
use urlzip::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";

pub fn create_test_state() -> (AppState, Arc<MemoryRecordStore>) {
    let store = Arc::new(MemoryRecordStore::new());
    let state = AppState::new(
        store.clone(),
        Arc::new(QrPngRenderer::new()),
        ServiceSettings::new(BASE_URL),
    );

    (state, store)
}

pub fn create_test_app() -> (Router, Arc<MemoryRecordStore>) {
    let (state, store) = create_test_state();
    let app = app_router(state, None, false).unwrap();

    (app, store)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryRecordStore>) {
    let (app, store) = create_test_app();

    (TestServer::new(app).unwrap(), store)
}

pub async fn create_test_record(store: &MemoryRecordStore, code: &str, url: &str) -> UrlRecord {
    let record = UrlRecord::new(
        code.to_string(),
        url.to_string(),
        BASE_URL,
        Utc::now(),
        Duration::days(365),
    );

    store.create_if_absent(&record).await.unwrap();
    record
}

pub async fn create_expired_record(store: &MemoryRecordStore, code: &str, url: &str) {
    let record = UrlRecord::new(
        code.to_string(),
        url.to_string(),
        BASE_URL,
        Utc::now() - Duration::days(2),
        Duration::days(1),
    );

    store.create_if_absent(&record).await.unwrap();
}

pub async fn clicks(store: &MemoryRecordStore, code: &str) -> i64 {
    store.get_record(code).await.unwrap().unwrap().clicks
}
