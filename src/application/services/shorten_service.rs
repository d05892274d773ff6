//! Short URL creation service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Record, ShortUrl};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;
use crate::utils::code_generator::candidate_identifier;
use crate::utils::url_validator::validate_target_url;

/// Default bound on candidate identifiers tried per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Service that turns long URLs into persisted short identifiers.
///
/// Each attempt derives a candidate from the URL and a fresh timestamp, then
/// writes it with [`RecordStore::put_if_absent`]. A taken identifier triggers
/// another attempt until `max_attempts` is reached.
pub struct ShortenService<S: RecordStore + ?Sized> {
    store: Arc<S>,
    domain: String,
    max_attempts: u32,
}

impl<S: RecordStore + ?Sized> ShortenService<S> {
    /// Creates a new shortening service.
    ///
    /// `domain` is the public host used to build short URLs, e.g.
    /// `"yourtinyurl.com"`. A value with an explicit `http://` or `https://`
    /// scheme is used as the base URL as-is. `max_attempts` is clamped to at
    /// least 1.
    pub fn new(store: Arc<S>, domain: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            store,
            domain: domain.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Shortens `long_url` and persists a new record with zero clicks.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is missing, empty or not an
    ///   absolute HTTP(S) URL; nothing is written
    /// - [`AppError::CollisionExhausted`] if every candidate was taken
    /// - [`AppError::Store`] if the store fails; no record is assumed created
    pub async fn shorten(&self, long_url: Option<&str>) -> Result<ShortUrl, AppError> {
        let long_url = validate_target_url(long_url.unwrap_or_default()).map_err(|e| {
            debug!(reason = %e, "Rejected long URL");
            AppError::validation(e.to_string())
        })?;

        for attempt in 1..=self.max_attempts {
            let short_id = candidate_identifier(&long_url, Utc::now(), attempt);
            let record = Record::new(short_id.clone(), long_url.clone(), Utc::now());

            let inserted = self.store.put_if_absent(&record).await.map_err(|e| {
                error!(short_id = %short_id, attempt, error = %e, kind = e.kind(), "Failed to persist record");
                e
            })?;

            if inserted {
                info!(short_id = %short_id, attempt, "Created short URL");
                return Ok(ShortUrl {
                    short_url: self.short_url(&short_id),
                    short_id,
                });
            }

            warn!(short_id = %short_id, attempt, "Identifier collision, retrying");
        }

        error!(
            attempts = self.max_attempts,
            "Gave up allocating a unique short_id"
        );
        Err(AppError::CollisionExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Builds the public short URL for an identifier.
    pub fn short_url(&self, short_id: &str) -> String {
        let domain = self.domain.trim_end_matches('/');
        if domain.starts_with("https://") || domain.starts_with("http://") {
            format!("{}/{}", domain, short_id)
        } else {
            format!("https://{}/{}", domain, short_id)
        }
    }

    /// Number of candidates tried before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
