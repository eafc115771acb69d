//! Short code resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::repositories::{IncrementOutcome, RecordStore};
use crate::error::AppError;

/// Resolves short codes to their original URL and counts the visit.
pub struct RedirectService {
    store: Arc<dyn RecordStore>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Resolves `code` to the URL the caller should redirect to.
    ///
    /// The click increment is awaited, but its outcome never changes the result. A
    /// failed or missed increment is logged and the redirect still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired and
    /// [`AppError::Internal`] if the lookup itself fails.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let record = self.store.get_record(code).await?.ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "code": code }))
        })?;

        match self.store.increment_clicks(code).await {
            Ok(IncrementOutcome::Done) => {
                debug!(code = %code, "Click recorded");
            }
            Ok(IncrementOutcome::NotFound) => {
                metrics::counter!("urlzip_click_increment_failures_total").increment(1);
                warn!(code = %code, "Record disappeared before click was recorded");
            }
            Err(e) => {
                metrics::counter!("urlzip_click_increment_failures_total").increment(1);
                warn!(code = %code, error = %e, "Failed to record click");
            }
        }

        metrics::counter!("urlzip_redirects_total").increment(1);

        Ok(record.original_url)
    }
}
