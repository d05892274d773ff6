//! Top-level router.
//!
//! # Route Structure
//!
//! - `POST /shorten`     - Create a short URL
//! - `GET  /health`      - Store health check
//! - `GET  /{short_id}`  - Redirect and count the click
//! - `HEAD /{short_id}`  - Same redirect, click not counted
//! - `GET  /`            - 400, identifier missing
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, every origin allowed
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    health_handler, missing_short_id_handler, redirect_handler, redirect_head_handler,
    shorten_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and per-request layers, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(missing_short_id_handler))
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route(
            "/{short_id}",
            get(redirect_handler).head(redirect_head_handler),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer())
}
