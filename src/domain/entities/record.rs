//! Record entity: one short identifier mapped to a long URL.

use chrono::{DateTime, Utc};

/// A stored short URL mapping.
///
/// Everything except `click_count` is fixed at creation. The counter only
/// moves through [`crate::domain::repositories::RecordStore::increment_counter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub short_id: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
}

impl Record {
    /// Creates a fresh record with a zero click count.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let record = Record::new("4GFfc3", "https://example.com", Utc::now());
    /// assert_eq!(record.click_count, 0);
    /// ```
    pub fn new(
        short_id: impl Into<String>,
        long_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_id: short_id.into(),
            long_url: long_url.into(),
            created_at,
            click_count: 0,
        }
    }
}

/// Numeric record fields that support atomic increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterField {
    ClickCount,
}

impl CounterField {
    /// Column / hash field name used by the store adapters.
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterField::ClickCount => "click_count",
        }
    }
}

/// A successfully shortened URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub short_id: String,
    pub short_url: String,
}

/// Outcome of a successful redirect lookup.
///
/// `click_count` is the counter value after this lookup's increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub target_url: String,
    pub click_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_starts_with_zero_clicks() {
        let now = Utc::now();
        let record = Record::new("abc123", "https://example.com", now);

        assert_eq!(record.short_id, "abc123");
        assert_eq!(record.long_url, "https://example.com");
        assert_eq!(record.created_at, now);
        assert_eq!(record.click_count, 0);
    }

    #[test]
    fn test_counter_field_name() {
        assert_eq!(CounterField::ClickCount.as_str(), "click_count");
    }
}
