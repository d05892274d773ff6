//! Handler for the shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/path" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "short_url": "https://yourtinyurl.com/2aZk9Q",
///   "short_id": "2aZk9Q"
/// }
/// ```
///
/// # Errors
///
/// - **400** missing body, malformed JSON, missing or invalid `url`
/// - **500** store failure or no free identifier after retries
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected shorten body");
        AppError::validation("Invalid JSON body")
    })?;

    payload.validate()?;

    let short = state
        .shorten_service
        .shorten(payload.url.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(short.into())))
}
