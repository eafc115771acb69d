//! PostgreSQL implementation of the record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{CreateOutcome, IncrementOutcome, RecordStore};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct RecordRow {
    short_code: String,
    original_url: String,
    short_url: String,
    created_at: DateTime<Utc>,
    clicks: i64,
    expires_at: i64,
}

impl From<RecordRow> for UrlRecord {
    fn from(row: RecordRow) -> Self {
        Self {
            short_code: row.short_code,
            original_url: row.original_url,
            short_url: row.short_url,
            created_at: row.created_at,
            clicks: row.clicks,
            expires_at: row.expires_at,
        }
    }
}

/// SQL statements bound to one table name.
struct Statements {
    create_table: String,
    create_index: String,
    select: String,
    insert: String,
    increment: String,
    purge: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        Self {
            create_table: format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    short_code   TEXT PRIMARY KEY,
                    original_url TEXT NOT NULL,
                    short_url    TEXT NOT NULL,
                    created_at   TIMESTAMPTZ NOT NULL,
                    clicks       BIGINT NOT NULL DEFAULT 0 CHECK (clicks >= 0),
                    expires_at   BIGINT NOT NULL
                )
                "#
            ),
            create_index: format!(
                "CREATE INDEX IF NOT EXISTS {table}_expires_at_idx ON {table} (expires_at)"
            ),
            select: format!(
                r#"
                SELECT short_code, original_url, short_url, created_at, clicks, expires_at
                FROM {table}
                WHERE short_code = $1 AND expires_at > $2
                "#
            ),
            // An expired row under the same code is replaced in place; a live one makes
            // the WHERE clause fail and nothing is returned.
            insert: format!(
                r#"
                INSERT INTO {table} (short_code, original_url, short_url, created_at, clicks, expires_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (short_code) DO UPDATE SET
                    original_url = EXCLUDED.original_url,
                    short_url = EXCLUDED.short_url,
                    created_at = EXCLUDED.created_at,
                    clicks = EXCLUDED.clicks,
                    expires_at = EXCLUDED.expires_at
                WHERE {table}.expires_at <= $7
                RETURNING short_code
                "#
            ),
            increment: format!(
                "UPDATE {table} SET clicks = clicks + 1 WHERE short_code = $1 AND expires_at > $2"
            ),
            purge: format!("DELETE FROM {table} WHERE expires_at <= $1"),
        }
    }
}

/// PostgreSQL record store.
///
/// PostgreSQL has no native row expiry, so reads filter on `expires_at` and
/// [`spawn_expiry_sweeper`] deletes stale rows in the background.
///
/// The table name comes from configuration and is validated as a plain identifier
/// before it reaches any statement.
pub struct PgRecordStore {
    pool: Arc<PgPool>,
    sql: Statements,
}

impl PgRecordStore {
    /// Creates a new store over `table` using the given connection pool.
    pub fn new(pool: Arc<PgPool>, table: &str) -> Self {
        Self {
            pool,
            sql: Statements::for_table(table),
        }
    }

    /// Creates the table and its expiry index if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(&self.sql.create_table)
            .execute(self.pool.as_ref())
            .await?;
        sqlx::query(&self.sql.create_index)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }

    /// Deletes every expired row and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query(&self.sql.purge)
            .bind(Utc::now().timestamp())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn get_record(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, RecordRow>(&self.sql.select)
            .bind(code)
            .bind(Utc::now().timestamp())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn create_if_absent(&self, record: &UrlRecord) -> Result<CreateOutcome, AppError> {
        let inserted = sqlx::query_scalar::<_, String>(&self.sql.insert)
            .bind(&record.short_code)
            .bind(&record.original_url)
            .bind(&record.short_url)
            .bind(record.created_at)
            .bind(record.clicks)
            .bind(record.expires_at)
            .bind(Utc::now().timestamp())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(match inserted {
            Some(_) => CreateOutcome::Created,
            None => CreateOutcome::AlreadyExists,
        })
    }

    async fn increment_clicks(&self, code: &str) -> Result<IncrementOutcome, AppError> {
        let result = sqlx::query(&self.sql.increment)
            .bind(code)
            .bind(Utc::now().timestamp())
            .execute(self.pool.as_ref())
            .await?;

        Ok(if result.rows_affected() > 0 {
            IncrementOutcome::Done
        } else {
            IncrementOutcome::NotFound
        })
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}

/// Spawns a task that purges expired rows every `interval`.
///
/// Failures are logged and the sweep is attempted again on the next tick.
pub fn spawn_expiry_sweeper(store: Arc<PgRecordStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick fires immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match store.purge_expired().await {
                Ok(0) => debug!("Expiry sweep found nothing to purge"),
                Ok(purged) => info!(purged, "Purged expired records"),
                Err(e) => error!("Expiry sweep failed: {}", e),
            }
        }
    })
}
