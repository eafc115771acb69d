//! API route configuration.
//!
//! All endpoints are public. Browser clients call them cross-origin, so every
//! endpoint that takes a request body or is fetched by script also answers
//! `OPTIONS` preflights.

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    code_image_handler, health_handler, preflight_handler, redirect_handler, shorten_handler,
};
use crate::api::middleware::rate_limit;
use crate::config::RateLimitSettings;
use crate::state::AppState;

/// All API routes.
///
/// # Endpoints
///
/// - `POST    /shorten`     - Create a short link (rate limited when `rate_limit` is set)
/// - `OPTIONS /shorten`     - CORS preflight
/// - `GET     /health`      - Store health check
/// - `GET     /{code}`      - Redirect to the original URL and count the click
/// - `GET     /{code}/qr`   - QR code PNG of the short URL
/// - `OPTIONS /{code}/qr`   - CORS preflight
///
/// # Errors
///
/// Returns an error if `rate_limit` describes an invalid token bucket.
pub fn routes(rate_limit: Option<RateLimitSettings>, behind_proxy: bool) -> Result<Router<AppState>> {
    let shorten = match rate_limit {
        Some(settings) => rate_limit::apply(post(shorten_handler), settings, behind_proxy)?,
        None => post(shorten_handler),
    };

    Ok(Router::new()
        .route("/shorten", shorten.options(preflight_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .route(
            "/{code}/qr",
            get(code_image_handler).options(preflight_handler),
        ))
}
