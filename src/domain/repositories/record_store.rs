//! Store contract for url records.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Result of a conditional create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Result of a click increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementOutcome {
    Done,
    NotFound,
}

/// Key-value store holding url records keyed by short code.
///
/// Implementations must provide native atomicity for [`RecordStore::create_if_absent`]
/// and [`RecordStore::increment_clicks`]; the services hold no locks of their own.
/// A record whose `expires_at` has passed must be invisible to every operation, even
/// if the backend has not physically removed it yet.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecordStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::RedisRecordStore`] - Redis
/// - [`crate::infrastructure::persistence::MemoryRecordStore`] - in-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches a live record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if the code exists and has not expired
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn get_record(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Inserts `record` unless a live record with the same code exists.
    ///
    /// At most one of any number of concurrent creates for the same code returns
    /// [`CreateOutcome::Created`]. An expired record does not block creation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn create_if_absent(&self, record: &UrlRecord) -> Result<CreateOutcome, AppError>;

    /// Atomically adds one to the record's click counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn increment_clicks(&self, code: &str) -> Result<IncrementOutcome, AppError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;
}
