//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortUrl;

/// Request to shorten a single URL.
///
/// `url` is optional at the JSON level so a missing field reaches the
/// service and is reported as "URL is required" instead of a decode error.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_id: String,
}

impl From<ShortUrl> for ShortenResponse {
    fn from(short: ShortUrl) -> Self {
        Self {
            short_url: short.short_url,
            short_id: short.short_id,
        }
    }
}
