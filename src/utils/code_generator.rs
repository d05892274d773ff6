//! Short identifier candidate derivation.
//!
//! A candidate is derived from the long URL, the current time and the attempt
//! number: the three are hashed with SHA-256, the first [`DIGEST_PREFIX_BYTES`]
//! bytes of the digest are read as a big-endian integer, and that integer is
//! base-62 encoded.
//!
//! The result is unique with high probability only. Callers must persist it
//! with a conditional insert and ask for a new candidate on conflict.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::utils::base62;

/// Number of digest bytes turned into the identifier (32 bits, at most 6 base-62 digits).
pub const DIGEST_PREFIX_BYTES: usize = 4;

/// Derives a candidate short identifier.
///
/// The same `(long_url, now, attempt)` triple always yields the same
/// candidate; changing any of them yields an unrelated one.
///
/// # Examples
///
/// ```ignore
/// let id = candidate_identifier("https://example.com", Utc::now(), 1);
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn candidate_identifier(long_url: &str, now: DateTime<Utc>, attempt: u32) -> String {
    base62::encode(candidate_seed(long_url, now, attempt))
}

/// Integer fed to the encoder for a given candidate.
pub fn candidate_seed(long_url: &str, now: DateTime<Utc>, attempt: u32) -> u64 {
    // Nanosecond timestamps fall back to microseconds outside the year 1677..2262 range.
    let ticks = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros());

    let mut hasher = Sha256::new();
    hasher.update(long_url.as_bytes());
    hasher.update(ticks.to_be_bytes());
    hasher.update(attempt.to_be_bytes());
    let digest = hasher.finalize();

    digest[..DIGEST_PREFIX_BYTES]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
