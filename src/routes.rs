//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`     - Create a short link
//! - `GET  /health`      - Health check
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /{code}/qr`   - QR code image
//!
//! # Middleware
//!
//! - **CORS** - Any origin, answers preflights
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `POST /shorten`
//!
//! Trailing slash normalization is applied by [`crate::server::run`].

use anyhow::Result;
use axum::Router;

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::config::RateLimitSettings;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - token bucket for `POST /shorten`, `None` disables limiting
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(
    state: AppState,
    rate_limit: Option<RateLimitSettings>,
    behind_proxy: bool,
) -> Result<Router> {
    Ok(api::routes::routes(rate_limit, behind_proxy)?
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer()))
}
