//! Short link creation service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::ServiceSettings;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{CreateOutcome, RecordStore};
use crate::error::AppError;
use crate::utils::code_generator::{is_reserved, random_code, validate_alias};
use crate::utils::url_validator::validate_url;

/// Service for creating short links.
///
/// Uniqueness is enforced by [`RecordStore::create_if_absent`] alone: there is no
/// lookup-then-insert window, so two callers racing for the same code cannot both
/// succeed.
pub struct ShortenService {
    store: Arc<dyn RecordStore>,
    settings: ServiceSettings,
}

impl ShortenService {
    /// Creates a new shorten service.
    pub fn new(store: Arc<dyn RecordStore>, settings: ServiceSettings) -> Self {
        Self { store, settings }
    }

    /// Creates a short link for `url`.
    ///
    /// # Arguments
    ///
    /// - `url` - The original URL, stored as given minus surrounding whitespace
    /// - `custom_alias` - Optional caller-chosen code; never retried on conflict
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or alias is invalid,
    /// [`AppError::Conflict`] if the alias is taken, [`AppError::Exhausted`] if no
    /// free random code was found and [`AppError::Internal`] on store errors.
    pub async fn shorten(
        &self,
        url: &str,
        custom_alias: Option<&str>,
    ) -> Result<UrlRecord, AppError> {
        let url = url.trim();

        validate_url(url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let record = match custom_alias {
            Some(alias) => self.create_with_alias(url, alias).await?,
            None => self.create_with_random_code(url).await?,
        };

        metrics::counter!("urlzip_links_created_total").increment(1);
        info!(
            code = %record.short_code,
            url = %record.original_url,
            "Short link created"
        );

        Ok(record)
    }

    async fn create_with_alias(&self, url: &str, alias: &str) -> Result<UrlRecord, AppError> {
        validate_alias(alias)?;

        let record = self.build_record(alias.to_string(), url);

        match self.store.create_if_absent(&record).await? {
            CreateOutcome::Created => Ok(record),
            CreateOutcome::AlreadyExists => {
                debug!(alias = %alias, "Custom alias already taken");
                Err(AppError::conflict(
                    "Custom alias already exists",
                    json!({ "alias": alias }),
                ))
            }
        }
    }

    /// Draws random codes until one is free or the attempt budget is spent.
    async fn create_with_random_code(&self, url: &str) -> Result<UrlRecord, AppError> {
        let max_attempts = self.settings.max_generation_attempts;

        for attempt in 1..=max_attempts {
            let code = random_code()?;

            if is_reserved(&code) {
                continue;
            }

            let record = self.build_record(code, url);

            match self.store.create_if_absent(&record).await? {
                CreateOutcome::Created => return Ok(record),
                CreateOutcome::AlreadyExists => {
                    metrics::counter!("urlzip_generation_collisions_total").increment(1);
                    debug!(
                        code = %record.short_code,
                        attempt,
                        "Random code collision, retrying"
                    );
                }
            }
        }

        warn!(max_attempts, "Failed to generate a unique short code");

        Err(AppError::exhausted(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": max_attempts }),
        ))
    }

    fn build_record(&self, code: String, url: &str) -> UrlRecord {
        UrlRecord::new(
            code,
            url.to_string(),
            &self.settings.base_url,
            Utc::now(),
            self.settings.record_ttl,
        )
    }
}
