//! Process-local record store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{CounterField, Record};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;

/// In-memory record store backed by a sharded [`DashMap`].
///
/// Conditional inserts go through the entry API and increments mutate the
/// value under its shard's write lock, so both are atomic with respect to
/// other callers. Data does not survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: DashMap<String, Record>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put_if_absent(&self, record: &Record) -> Result<bool, AppError> {
        match self.records.entry(record.short_id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(true)
            }
        }
    }

    async fn get(&self, short_id: &str) -> Result<Option<Record>, AppError> {
        Ok(self.records.get(short_id).map(|r| r.value().clone()))
    }

    async fn increment_counter(
        &self,
        short_id: &str,
        field: CounterField,
        delta: u64,
    ) -> Result<Option<u64>, AppError> {
        let Some(mut record) = self.records.get_mut(short_id) else {
            return Ok(None);
        };

        let counter = match field {
            CounterField::ClickCount => &mut record.click_count,
        };
        *counter = counter.saturating_add(delta);

        Ok(Some(*counter))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn record(short_id: &str, url: &str) -> Record {
        Record::new(short_id, url, Utc::now())
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryRecordStore::new();

        assert!(store
            .put_if_absent(&record("abc123", "https://example.com"))
            .await
            .unwrap());

        let found = store.get("abc123").await.unwrap().unwrap();
        assert_eq!(found.long_url, "https://example.com");
        assert_eq!(found.click_count, 0);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryRecordStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_if_absent_keeps_existing() {
        let store = InMemoryRecordStore::new();

        assert!(store
            .put_if_absent(&record("abc123", "https://first.com"))
            .await
            .unwrap());
        assert!(!store
            .put_if_absent(&record("abc123", "https://second.com"))
            .await
            .unwrap());

        let found = store.get("abc123").await.unwrap().unwrap();
        assert_eq!(found.long_url, "https://first.com");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_increment_missing_creates_nothing() {
        let store = InMemoryRecordStore::new();

        let result = store
            .increment_counter("ghost", CounterField::ClickCount, 1)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_increment_returns_new_value() {
        let store = InMemoryRecordStore::new();
        store
            .put_if_absent(&record("abc123", "https://example.com"))
            .await
            .unwrap();

        let first = store
            .increment_counter("abc123", CounterField::ClickCount, 1)
            .await
            .unwrap();
        let second = store
            .increment_counter("abc123", CounterField::ClickCount, 5)
            .await
            .unwrap();

        assert_eq!(first, Some(1));
        assert_eq!(second, Some(6));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(InMemoryRecordStore::new());
        store
            .put_if_absent(&record("hot", "https://example.com"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .increment_counter("hot", CounterField::ClickCount, 1)
                        .await
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let found = store.get("hot").await.unwrap().unwrap();
        assert_eq!(found.click_count, 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_put_if_absent_single_winner() {
        let store = Arc::new(InMemoryRecordStore::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .put_if_absent(&record("same", &format!("https://example.com/{i}")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }
}
