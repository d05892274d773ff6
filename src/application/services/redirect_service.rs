//! Short identifier resolution and click counting.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::entities::{CounterField, Record, Resolution};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;
use crate::utils::base62::is_base62;

const NOT_FOUND_MESSAGE: &str = "short_id not found";

/// Service that resolves short identifiers and counts clicks.
///
/// A lookup reads the record and then increments `click_count` with the
/// store's atomic increment. The increment happens exactly once per
/// successful lookup and never for an unknown identifier.
pub struct RedirectService<S: RecordStore + ?Sized> {
    store: Arc<S>,
}

impl<S: RecordStore + ?Sized> RedirectService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves `short_id` to its target URL and counts the click.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the identifier is missing or empty
    /// - [`AppError::NotFound`] if no record exists; nothing is mutated
    /// - [`AppError::Store`] if the lookup or the increment fails
    pub async fn resolve(&self, short_id: Option<&str>) -> Result<Resolution, AppError> {
        let short_id = checked_short_id(short_id.unwrap_or_default())?;

        let record = self
            .store
            .get(short_id)
            .await
            .inspect_err(|e| {
                error!(short_id = %short_id, error = %e, kind = e.kind(), "Record lookup failed")
            })?
            .ok_or_else(|| {
                debug!(short_id = %short_id, "Unknown short_id");
                AppError::not_found(NOT_FOUND_MESSAGE)
            })?;

        let click_count = self
            .store
            .increment_counter(short_id, CounterField::ClickCount, 1)
            .await
            .inspect_err(|e| {
                error!(short_id = %short_id, error = %e, kind = e.kind(), "Click increment failed")
            })?
            .ok_or_else(|| {
                warn!(short_id = %short_id, "Record disappeared before click increment");
                AppError::not_found(NOT_FOUND_MESSAGE)
            })?;

        debug!(short_id = %short_id, click_count, "Resolved short_id");

        Ok(Resolution {
            target_url: record.long_url,
            click_count,
        })
    }

    /// Reads a record without counting a click.
    ///
    /// Used by administrative tooling.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`], minus the increment.
    pub async fn peek(&self, short_id: &str) -> Result<Record, AppError> {
        let short_id = checked_short_id(short_id)?;

        self.store
            .get(short_id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))
    }
}

/// Blank identifiers are a validation error. Anything that is not exactly
/// base62 cannot be a stored key and is reported as not found; the value is
/// never trimmed or rewritten before lookup.
fn checked_short_id(short_id: &str) -> Result<&str, AppError> {
    if short_id.trim().is_empty() {
        return Err(AppError::validation("short_id is required"));
    }

    if !is_base62(short_id) {
        debug!("Rejected malformed short_id");
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    }

    Ok(short_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockRecordStore;
    use chrono::Utc;

    fn record(short_id: &str, url: &str) -> Record {
        Record::new(short_id, url, Utc::now())
    }

    #[tokio::test]
    async fn test_resolve_increments_once() {
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .withf(|id| id == "abc123")
            .times(1)
            .returning(|id| Ok(Some(record(id, "https://example.com/target"))));
        store
            .expect_increment_counter()
            .withf(|id, field, delta| {
                id == "abc123" && *field == CounterField::ClickCount && *delta == 1
            })
            .times(1)
            .returning(|_, _, _| Ok(Some(1)));

        let resolution = RedirectService::new(Arc::new(store))
            .resolve(Some("abc123"))
            .await
            .unwrap();

        assert_eq!(resolution.target_url, "https://example.com/target");
        assert_eq!(resolution.click_count, 1);
    }

    #[tokio::test]
    async fn test_resolve_unknown_does_not_increment() {
        let mut store = MockRecordStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));
        store.expect_increment_counter().times(0);

        let result = RedirectService::new(Arc::new(store))
            .resolve(Some("nope42"))
            .await;

        match result {
            Err(AppError::NotFound(message)) => assert_eq!(message, "short_id not found"),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_missing_identifier() {
        let mut store = MockRecordStore::new();
        store.expect_get().times(0);
        store.expect_increment_counter().times(0);

        let service = RedirectService::new(Arc::new(store));

        assert!(matches!(
            service.resolve(None).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.resolve(Some("  ")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_malformed_identifier_skips_store() {
        let mut store = MockRecordStore::new();
        store.expect_get().times(0);
        store.expect_increment_counter().times(0);

        let result = RedirectService::new(Arc::new(store))
            .resolve(Some("../etc"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_does_not_trim_identifier() {
        let mut store = MockRecordStore::new();
        store.expect_get().times(0);
        store.expect_increment_counter().times(0);

        let service = RedirectService::new(Arc::new(store));

        for id in [" abc123", "abc123 ", "abc123\n"] {
            assert!(matches!(
                service.resolve(Some(id)).await,
                Err(AppError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_peek_rejects_malformed_identifier() {
        let mut store = MockRecordStore::new();
        store.expect_get().times(0);

        let service = RedirectService::new(Arc::new(store));

        assert!(matches!(
            service.peek(" abc123").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.peek("").await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_resolve_lookup_failure() {
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(AppError::store("timeout")));
        store.expect_increment_counter().times(0);

        let result = RedirectService::new(Arc::new(store))
            .resolve(Some("abc123"))
            .await;

        assert!(matches!(result, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn test_resolve_increment_failure_is_reported() {
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .returning(|id| Ok(Some(record(id, "https://example.com"))));
        store
            .expect_increment_counter()
            .times(1)
            .returning(|_, _, _| Err(AppError::store("write failed")));

        let result = RedirectService::new(Arc::new(store))
            .resolve(Some("abc123"))
            .await;

        assert!(matches!(result, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn test_resolve_record_vanished_before_increment() {
        let mut store = MockRecordStore::new();
        store
            .expect_get()
            .returning(|id| Ok(Some(record(id, "https://example.com"))));
        store
            .expect_increment_counter()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let result = RedirectService::new(Arc::new(store))
            .resolve(Some("abc123"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_peek_does_not_increment() {
        let mut store = MockRecordStore::new();
        store.expect_get().times(1).returning(|id| {
            let mut r = record(id, "https://example.com");
            r.click_count = 7;
            Ok(Some(r))
        });
        store.expect_increment_counter().times(0);

        let record = RedirectService::new(Arc::new(store))
            .peek("abc123")
            .await
            .unwrap();

        assert_eq!(record.click_count, 7);
    }
}
