//! Infrastructure layer for external integrations.
//!
//! This layer implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Record store adapters (PostgreSQL, Redis, in-memory)
//! - [`rendering`] - QR code image encoder

pub mod persistence;
pub mod rendering;
