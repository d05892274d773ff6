//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its target URL and counts the click.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Response Codes
///
/// - **301 Moved Permanently** with `Location: <target_url>`
/// - **400 Bad Request** path segment is not valid UTF-8
/// - **404 Not Found** unknown identifier, nothing is counted
/// - **500** store failure
pub async fn redirect_handler(
    State(state): State<AppState>,
    short_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let short_id = extract_short_id(short_id)?;
    let resolution = state.redirect_service.resolve(Some(&short_id)).await?;

    Ok(moved_permanently(resolution.target_url))
}

/// Answers `HEAD /{short_id}` like `GET` without counting a click.
///
/// Link previewers and uptime checkers issue `HEAD` requests; they are not
/// visits.
pub async fn redirect_head_handler(
    State(state): State<AppState>,
    short_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let short_id = extract_short_id(short_id)?;
    let record = state.redirect_service.peek(&short_id).await?;

    Ok(moved_permanently(record.long_url))
}

/// `GET /` carries no identifier.
pub async fn missing_short_id_handler() -> AppError {
    AppError::validation("short_id is required")
}

fn extract_short_id(short_id: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    short_id.map(|Path(id)| id).map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected short_id path");
        AppError::validation("Invalid short_id")
    })
}

// Redirect::permanent would answer 308.
fn moved_permanently(location: String) -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)])
}
