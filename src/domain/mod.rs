//! Domain layer containing the record model and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - The persisted [`entities::UrlRecord`]
//! - [`repositories`] - The [`repositories::RecordStore`] contract over the key-value store
//! - [`rendering`] - The [`rendering::ImageRenderer`] contract over the QR encoder
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Uniqueness and click counting are delegated to the store's atomic primitives
//! - Business logic lives in services (see [`crate::application::services`])

pub mod entities;
pub mod rendering;
pub mod repositories;
