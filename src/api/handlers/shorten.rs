//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "customAlias": "my-link"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortCode": "my-link",
///   "shortUrl": "https://s.example.com/my-link",
///   "originalUrl": "https://example.com/some/long/path",
///   "createdAt": "2025-01-02T03:04:05.678Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is missing or malformed, or the URL or alias is invalid
/// - 409 if the custom alias is taken
/// - 500 if no free code could be generated or the store fails
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state
        .shorten_service
        .shorten(&payload.url, payload.custom_alias.as_deref())
        .await?;

    Ok(Json(ShortenResponse::from(record)))
}
