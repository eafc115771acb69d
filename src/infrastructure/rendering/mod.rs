//! Image renderer implementations.
//!
//! - [`QrPngRenderer`] - QR code encoded as a grayscale PNG

mod qr_png;

pub use qr_png::QrPngRenderer;
