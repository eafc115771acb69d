//! Application layer services implementing the short-code engine.
//!
//! Services consume the [`crate::domain::repositories::RecordStore`] and
//! [`crate::domain::rendering::ImageRenderer`] contracts and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::ShortenService`] - Validation, code generation and record creation
//! - [`services::RedirectService`] - Code resolution with click counting
//! - [`services::CodeImageService`] - QR image rendering for a short code

pub mod services;
