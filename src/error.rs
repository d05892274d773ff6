//! Application error taxonomy and its HTTP mapping.
//!
//! Every service operation returns [`AppError`]. Handlers convert it into a
//! `{ "error": "..." }` JSON body with the matching status code. The public
//! message never carries the long URL, the short identifier, or backend error
//! text; those details stay in the logs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed caller input.
    #[error("{0}")]
    Validation(String),

    /// The identifier has no record.
    #[error("{0}")]
    NotFound(String),

    /// Every candidate identifier was already taken.
    #[error("could not allocate a unique short_id after {attempts} attempts")]
    CollisionExhausted { attempts: u32 },

    /// The record store failed or is unreachable.
    #[error("store error: {0}")]
    Store(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Short machine-friendly name of the variant, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::CollisionExhausted { .. } => "collision_exhausted",
            AppError::Store(_) => "store",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CollisionExhausted { .. } | AppError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message that is safe to hand to an untrusted caller.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(message) | AppError::NotFound(message) => message.clone(),
            AppError::CollisionExhausted { .. } | AppError::Store(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(format!("database: {e}"))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::Store(format!("redis: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::Validation(message)
    }
}
