//! Redis implementation of the record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{CreateOutcome, IncrementOutcome, RecordStore};
use crate::error::AppError;

/// Writes every field and sets the key's expiry, unless a live record holds the key.
/// ARGV[7] is the current epoch second; a record with `expires_at <= now` is replaced.
const CREATE_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    local expires_at = redis.call('HGET', KEYS[1], 'expires_at')
    if not expires_at or tonumber(expires_at) > tonumber(ARGV[7]) then
        return 0
    end
    redis.call('DEL', KEYS[1])
end
redis.call('HSET', KEYS[1],
    'short_code', ARGV[1],
    'original_url', ARGV[2],
    'short_url', ARGV[3],
    'created_at', ARGV[4],
    'clicks', ARGV[5],
    'expires_at', ARGV[6])
redis.call('EXPIREAT', KEYS[1], ARGV[6])
return 1
"#;

/// Adds one click to a live record; returns -1 when the key is gone or expired.
/// ARGV[1] is the current epoch second.
const INCREMENT_SCRIPT: &str = r#"
local expires_at = redis.call('HGET', KEYS[1], 'expires_at')
if not expires_at or tonumber(expires_at) <= tonumber(ARGV[1]) then
    return -1
end
return redis.call('HINCRBY', KEYS[1], 'clicks', 1)
"#;

/// Redis record store.
///
/// Each record is a hash under `{namespace}:{code}` with `EXPIREAT` set to the
/// record's `expires_at`, so Redis itself purges expired records. Reads and both
/// scripts also compare `expires_at` with the current time, so a record Redis has
/// not purged yet is still treated as gone. Create and increment run as Lua scripts
/// and are therefore atomic.
pub struct RedisRecordStore {
    client: ConnectionManager,
    key_prefix: String,
    create_script: Script,
    increment_script: Script,
}

impl RedisRecordStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the URL is invalid, the connection cannot be
    /// established, or the PING fails.
    pub async fn connect(redis_url: &str, namespace: &str) -> Result<Self, AppError> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: format!("{namespace}:"),
            create_script: Script::new(CREATE_SCRIPT),
            increment_script: Script::new(INCREMENT_SCRIPT),
        })
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

/// Rebuilds a record from the fields of its hash.
fn record_from_hash(code: &str, mut fields: HashMap<String, String>) -> Result<UrlRecord, AppError> {
    let corrupt = |field: &str| {
        AppError::internal(
            "Corrupt record in store",
            json!({ "code": code, "field": field }),
        )
    };

    let original_url = fields
        .remove("original_url")
        .ok_or_else(|| corrupt("original_url"))?;
    let short_url = fields.remove("short_url").unwrap_or_default();
    let created_at = fields
        .get("created_at")
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| corrupt("created_at"))?;
    let clicks = fields
        .get("clicks")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| corrupt("clicks"))?;
    let expires_at = fields
        .get("expires_at")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| corrupt("expires_at"))?;

    Ok(UrlRecord {
        short_code: code.to_string(),
        original_url,
        short_url,
        created_at,
        clicks,
        expires_at,
    })
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn get_record(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        let fields: HashMap<String, String> = conn.hgetall(&key).await?;
        if fields.is_empty() {
            debug!("Record MISS: {}", code);
            return Ok(None);
        }

        let record = record_from_hash(code, fields)?;

        // Clock skew between hosts can outlive EXPIREAT.
        if record.is_expired() {
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn create_if_absent(&self, record: &UrlRecord) -> Result<CreateOutcome, AppError> {
        let key = self.build_key(&record.short_code);
        let mut conn = self.client.clone();

        let created: i64 = self
            .create_script
            .key(&key)
            .arg(&record.short_code)
            .arg(&record.original_url)
            .arg(&record.short_url)
            .arg(record.created_at.to_rfc3339())
            .arg(record.clicks)
            .arg(record.expires_at)
            .arg(Utc::now().timestamp())
            .invoke_async(&mut conn)
            .await?;

        Ok(if created == 1 {
            CreateOutcome::Created
        } else {
            CreateOutcome::AlreadyExists
        })
    }

    async fn increment_clicks(&self, code: &str) -> Result<IncrementOutcome, AppError> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        let clicks: i64 = self
            .increment_script
            .key(&key)
            .arg(Utc::now().timestamp())
            .invoke_async(&mut conn)
            .await?;

        Ok(if clicks < 0 {
            IncrementOutcome::NotFound
        } else {
            IncrementOutcome::Done
        })
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
