//! Handler for bare `OPTIONS` requests.

use axum::http::StatusCode;

/// Answers `OPTIONS` with 200 and an empty body.
///
/// Behind [`crate::api::middleware::cors::layer`] the CORS layer answers `OPTIONS`
/// first and adds the `Access-Control-*` headers.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}
