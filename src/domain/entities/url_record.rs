//! Url record entity representing a short code mapping.

use chrono::{DateTime, Duration, Utc};

/// A short code mapped to its original URL.
///
/// `clicks` is only ever changed by the store's atomic increment; the service never
/// writes it after creation. `expires_at` is in epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
    pub expires_at: i64,
}

impl UrlRecord {
    /// Builds a fresh record created at `now` and living for `ttl`.
    ///
    /// `short_url` is derived as `{base_url}/{short_code}`. An expiry past the last
    /// representable instant saturates to it.
    pub fn new(
        short_code: String,
        original_url: String,
        base_url: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let short_url = build_short_url(base_url, &short_code);
        let expires_at = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            short_code,
            original_url,
            short_url,
            created_at: now,
            clicks: 0,
            expires_at: expires_at.timestamp(),
        }
    }

    /// Returns true once `now` has reached `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Joins a base URL and a short code with exactly one slash.
pub fn build_short_url(base_url: &str, short_code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), short_code)
}
