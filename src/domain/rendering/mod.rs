//! Contract for turning a short URL into a scannable image.

use async_trait::async_trait;

/// Errors raised by an [`ImageRenderer`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to encode QR code: {0}")]
    Encode(String),

    #[error("Failed to write image: {0}")]
    Image(String),

    #[error("Render task failed: {0}")]
    Task(String),
}

/// Fixed rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Minimum edge length of the output image in pixels.
    pub width: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 300,
            margin: 2,
        }
    }
}

/// Encodes text into a raster image.
///
/// # Implementations
///
/// - [`crate::infrastructure::rendering::QrPngRenderer`] - QR code as PNG
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRenderer: Send + Sync {
    /// Returns the encoded image bytes for `text`.
    async fn render(&self, text: &str, options: RenderOptions) -> Result<Vec<u8>, RenderError>;

    /// MIME type of the bytes returned by [`ImageRenderer::render`].
    fn content_type(&self) -> &'static str;
}
