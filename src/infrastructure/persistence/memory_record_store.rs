//! In-process record store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{CreateOutcome, IncrementOutcome, RecordStore};
use crate::error::AppError;

/// Record store backed by a mutex-guarded map.
///
/// Each operation holds the lock for its whole read-modify-write, which gives the same
/// per-key atomicity the networked stores provide natively. Expired records are hidden
/// on read and overwritten on create; [`MemoryRecordStore::purge_expired`] removes them.
///
/// # Use Cases
///
/// - Integration and unit tests
/// - Local development with `STORE_BACKEND=memory`
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<String, UrlRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        debug!("Using in-memory record store");
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UrlRecord>> {
        // A panic while holding the lock cannot leave a record half-written.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes expired records and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        before - records.len()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_record(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let now = Utc::now();
        Ok(self
            .lock()
            .get(code)
            .filter(|record| !record.is_expired_at(now))
            .cloned())
    }

    async fn create_if_absent(&self, record: &UrlRecord) -> Result<CreateOutcome, AppError> {
        let now = Utc::now();
        let mut records = self.lock();

        if records
            .get(&record.short_code)
            .is_some_and(|existing| !existing.is_expired_at(now))
        {
            return Ok(CreateOutcome::AlreadyExists);
        }

        records.insert(record.short_code.clone(), record.clone());
        Ok(CreateOutcome::Created)
    }

    async fn increment_clicks(&self, code: &str) -> Result<IncrementOutcome, AppError> {
        let now = Utc::now();
        let mut records = self.lock();

        match records.get_mut(code) {
            Some(record) if !record.is_expired_at(now) => {
                record.clicks += 1;
                Ok(IncrementOutcome::Done)
            }
            _ => Ok(IncrementOutcome::NotFound),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    fn record(code: &str) -> UrlRecord {
        UrlRecord::new(
            code.to_string(),
            "https://example.com".to_string(),
            "https://s.example.com",
            Utc::now(),
            Duration::days(365),
        )
    }

    fn expired(code: &str) -> UrlRecord {
        UrlRecord::new(
            code.to_string(),
            "https://expired.example.com".to_string(),
            "https://s.example.com",
            Utc::now() - Duration::days(2),
            Duration::days(1),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryRecordStore::new();
        let created = record("abc123");

        assert_eq!(
            store.create_if_absent(&created).await.unwrap(),
            CreateOutcome::Created
        );
        assert_eq!(store.get_record("abc123").await.unwrap(), Some(created));
        assert_eq!(store.get_record("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_existing_code() {
        let store = MemoryRecordStore::new();
        store.create_if_absent(&record("abc123")).await.unwrap();

        let mut second = record("abc123");
        second.original_url = "https://other.example.com".to_string();

        assert_eq!(
            store.create_if_absent(&second).await.unwrap(),
            CreateOutcome::AlreadyExists
        );
        let stored = store.get_record("abc123").await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_expired_record_is_invisible_and_replaceable() {
        let store = MemoryRecordStore::new();
        store.create_if_absent(&expired("old")).await.unwrap();

        assert_eq!(store.get_record("old").await.unwrap(), None);
        assert_eq!(
            store.increment_clicks("old").await.unwrap(),
            IncrementOutcome::NotFound
        );
        assert_eq!(
            store.create_if_absent(&record("old")).await.unwrap(),
            CreateOutcome::Created
        );
        assert!(store.get_record("old").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_increment_missing_code() {
        let store = MemoryRecordStore::new();
        assert_eq!(
            store.increment_clicks("nope").await.unwrap(),
            IncrementOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_concurrent_creates_single_winner() {
        let store = Arc::new(MemoryRecordStore::new());

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create_if_absent(&record("race")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() == CreateOutcome::Created {
                created += 1;
            }
        }

        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = MemoryRecordStore::new();
        store.create_if_absent(&expired("old")).await.unwrap();
        store.create_if_absent(&record("new")).await.unwrap();

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }
}
