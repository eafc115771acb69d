//! Handler for QR code images.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Returns a PNG QR code encoding the short URL of `code`.
///
/// # Endpoint
///
/// `GET /{code}/qr`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or expired and
/// 500 if rendering fails.
pub async fn code_image_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let image = state.code_image_service.render_image(&code).await?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}
