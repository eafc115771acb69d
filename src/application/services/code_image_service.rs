//! QR image rendering for short codes.

use std::sync::Arc;

use serde_json::json;
use tracing::error;

use crate::config::ServiceSettings;
use crate::domain::entities::UrlRecord;
use crate::domain::entities::url_record::build_short_url;
use crate::domain::rendering::{ImageRenderer, RenderOptions};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;

/// A rendered image together with its MIME type.
#[derive(Debug, Clone)]
pub struct CodeImage {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders a scannable image that encodes a record's short URL.
pub struct CodeImageService {
    store: Arc<dyn RecordStore>,
    renderer: Arc<dyn ImageRenderer>,
    settings: ServiceSettings,
    options: RenderOptions,
}

impl CodeImageService {
    /// Creates a new image service with the default render options
    /// (300 px, 2-module margin).
    pub fn new(
        store: Arc<dyn RecordStore>,
        renderer: Arc<dyn ImageRenderer>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            store,
            renderer,
            settings,
            options: RenderOptions::default(),
        }
    }

    /// Renders the image for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired and
    /// [`AppError::Internal`] on store or renderer failure. Renderer failures are
    /// not retried.
    pub async fn render_image(&self, code: &str) -> Result<CodeImage, AppError> {
        let record = self.store.get_record(code).await?.ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "code": code }))
        })?;

        let target = self.target_url(&record);

        let bytes = self
            .renderer
            .render(&target, self.options)
            .await
            .map_err(|e| {
                error!(code = %code, error = %e, "Failed to render code image");
                AppError::internal("Failed to render code image", json!({ "code": code }))
            })?;

        metrics::counter!("urlzip_images_rendered_total").increment(1);

        Ok(CodeImage {
            content_type: self.renderer.content_type(),
            bytes,
        })
    }

    /// The string encoded into the image: the stored short URL, or one rebuilt from
    /// the configured base URL when the record has none.
    pub fn target_url(&self, record: &UrlRecord) -> String {
        if record.short_url.is_empty() {
            build_short_url(&self.settings.base_url, &record.short_code)
        } else {
            record.short_url.clone()
        }
    }
}
