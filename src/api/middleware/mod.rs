//! HTTP middleware for request processing and protection.
//!
//! Layers applied by [`crate::routes::app_router`].

pub mod cors;
pub mod rate_limit;
pub mod tracing;
