//! Business logic services for the application layer.

pub mod code_image_service;
pub mod redirect_service;
pub mod shorten_service;

pub use code_image_service::CodeImageService;
pub use redirect_service::RedirectService;
pub use shorten_service::ShortenService;
