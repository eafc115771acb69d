//! HTTP request handlers for API endpoints.
//!
//! Each handler is a thin adapter over one application service.

pub mod code_image;
pub mod health;
pub mod preflight;
pub mod redirect;
pub mod shorten;

pub use code_image::code_image_handler;
pub use health::health_handler;
pub use preflight::preflight_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
