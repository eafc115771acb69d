//! QR code to PNG renderer.

use async_trait::async_trait;
use image::{DynamicImage, GrayImage, ImageFormat, Luma, imageops};
use qrcode::QrCode;
use std::io::Cursor;

use crate::domain::rendering::{ImageRenderer, RenderError, RenderOptions};

/// Renders text as a black-on-white QR code PNG.
///
/// Encoding is CPU-bound and runs on the blocking thread pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrPngRenderer;

impl QrPngRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Encodes `text` synchronously.
///
/// The module size is the smallest whole number of pixels that makes the symbol
/// plus its quiet zone at least `options.width` wide.
pub fn encode_png(text: &str, options: RenderOptions) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| RenderError::Encode(e.to_string()))?;

    let modules = code.width() as u32 + 2 * options.margin;
    let module_px = options.width.div_ceil(modules).max(1);

    let symbol = code
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .module_dimensions(module_px, module_px)
        .build();

    let side = modules * module_px;
    let offset = i64::from(options.margin * module_px);
    let mut canvas = GrayImage::from_pixel(side, side, Luma([255u8]));
    imageops::overlay(&mut canvas, &symbol, offset, offset);

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(canvas)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| RenderError::Image(e.to_string()))?;

    Ok(bytes)
}

#[async_trait]
impl ImageRenderer for QrPngRenderer {
    async fn render(&self, text: &str, options: RenderOptions) -> Result<Vec<u8>, RenderError> {
        let text = text.to_string();

        tokio::task::spawn_blocking(move || encode_png(&text, options))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }

    fn content_type(&self) -> &'static str {
        "image/png"
    }
}
