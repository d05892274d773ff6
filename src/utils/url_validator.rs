//! Validation of long URLs submitted for shortening.
//!
//! A long URL ends up verbatim in the `Location` header of every redirect, so
//! only absolute `http`/`https` URLs with a host are accepted. The caller's
//! spelling is kept when it is already plain visible ASCII; otherwise the
//! percent-encoded serialization produced by the `url` crate is stored.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format")]
    InvalidFormat,

    #[error("Only HTTP and HTTPS URLs are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a long URL and returns the form to persist.
///
/// Surrounding whitespace is trimmed before validation.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for empty or whitespace-only input
/// - [`UrlValidationError::InvalidFormat`] when the input is not an absolute URL
/// - [`UrlValidationError::UnsupportedProtocol`] for schemes other than HTTP(S)
/// - [`UrlValidationError::MissingHost`] when no host is present
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     validate_target_url("  https://example.com/a  ").unwrap(),
///     "https://example.com/a"
/// );
/// assert!(validate_target_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|_| UrlValidationError::InvalidFormat)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    if trimmed.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(trimmed.to_string())
    } else {
        Ok(url.to_string())
    }
}
