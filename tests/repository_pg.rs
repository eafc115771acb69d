//! PostgreSQL record store tests.
//!
//! Need a live server: `DATABASE_URL=postgres://... cargo test -- --ignored`.
//! Each test runs in its own database created by `sqlx::test`.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use urlzip::domain::entities::UrlRecord;
use urlzip::domain::repositories::{CreateOutcome, IncrementOutcome, RecordStore};
use urlzip::infrastructure::persistence::PgRecordStore;

async fn create_store(pool: PgPool) -> PgRecordStore {
    let store = PgRecordStore::new(Arc::new(pool), "url_records");
    store.ensure_schema().await.unwrap();
    store
}

fn record(code: &str, url: &str) -> UrlRecord {
    UrlRecord::new(
        code.to_string(),
        url.to_string(),
        "https://s.example.com",
        Utc::now(),
        Duration::days(365),
    )
}

fn expired_record(code: &str, url: &str) -> UrlRecord {
    UrlRecord::new(
        code.to_string(),
        url.to_string(),
        "https://s.example.com",
        Utc::now() - Duration::days(2),
        Duration::days(1),
    )
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_get(pool: PgPool) {
    let store = create_store(pool).await;

    let outcome = store
        .create_if_absent(&record("abc123", "https://example.com"))
        .await
        .unwrap();
    assert_eq!(outcome, CreateOutcome::Created);

    let found = store.get_record("abc123").await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://example.com");
    assert_eq!(found.short_url, "https://s.example.com/abc123");
    assert_eq!(found.clicks, 0);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_create_existing_code(pool: PgPool) {
    let store = create_store(pool).await;
    store
        .create_if_absent(&record("taken", "https://first.example.com"))
        .await
        .unwrap();

    let outcome = store
        .create_if_absent(&record("taken", "https://second.example.com"))
        .await
        .unwrap();
    assert_eq!(outcome, CreateOutcome::AlreadyExists);

    let found = store.get_record("taken").await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://first.example.com");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_expired_record_is_hidden_and_replaceable(pool: PgPool) {
    let store = create_store(pool).await;
    store
        .create_if_absent(&expired_record("old", "https://old.example.com"))
        .await
        .unwrap();

    assert!(store.get_record("old").await.unwrap().is_none());
    assert_eq!(
        store.increment_clicks("old").await.unwrap(),
        IncrementOutcome::NotFound
    );

    let outcome = store
        .create_if_absent(&record("old", "https://new.example.com"))
        .await
        .unwrap();
    assert_eq!(outcome, CreateOutcome::Created);

    let found = store.get_record("old").await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://new.example.com");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments(pool: PgPool) {
    let store = Arc::new(create_store(pool).await);
    store
        .create_if_absent(&record("hot", "https://example.com"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.increment_clicks("hot").await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), IncrementOutcome::Done);
    }

    let found = store.get_record("hot").await.unwrap().unwrap();
    assert_eq!(found.clicks, 20);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_unknown_code(pool: PgPool) {
    let store = create_store(pool).await;

    assert_eq!(
        store.increment_clicks("nothere").await.unwrap(),
        IncrementOutcome::NotFound
    );
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_purge_expired(pool: PgPool) {
    let store = create_store(pool).await;
    store
        .create_if_absent(&expired_record("old1", "https://example.com"))
        .await
        .unwrap();
    store
        .create_if_absent(&expired_record("old2", "https://example.com"))
        .await
        .unwrap();
    store
        .create_if_absent(&record("live", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(store.purge_expired().await.unwrap(), 2);
    assert!(store.get_record("live").await.unwrap().is_some());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    let store = create_store(pool).await;
    assert!(store.health_check().await);
}
