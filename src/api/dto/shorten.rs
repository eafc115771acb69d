//! DTOs for the shorten endpoint.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten a URL.
///
/// An empty `customAlias` is treated the same as an absent one.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    /// Optional caller-chosen short code.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub custom_alias: Option<String>,
}

/// Created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    /// ISO-8601 with millisecond precision, e.g. `2025-01-02T03:04:05.678Z`.
    pub created_at: String,
}

impl From<UrlRecord> for ShortenResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            created_at: record
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            short_code: record.short_code,
            short_url: record.short_url,
            original_url: record.original_url,
        }
    }
}
