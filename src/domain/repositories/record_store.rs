//! Record store contract.

use crate::domain::entities::{CounterField, Record};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable key-value store for [`Record`]s keyed by `short_id`.
///
/// All coordination between concurrent requests happens inside the store:
/// identifier creation goes through [`put_if_absent`](Self::put_if_absent) and
/// click counting through [`increment_counter`](Self::increment_counter). Callers
/// never read-modify-write a record.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryRecordStore`] - process-local, for development and tests
/// - [`crate::infrastructure::persistence::PgRecordStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::RedisRecordStore`] - Redis hashes
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts `record` only if no record with the same `short_id` exists.
    ///
    /// Returns `Ok(true)` when the record was written and `Ok(false)` when the
    /// identifier was already taken (the existing record is left untouched).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the backend fails.
    async fn put_if_absent(&self, record: &Record) -> Result<bool, AppError>;

    /// Fetches a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the backend fails.
    async fn get(&self, short_id: &str) -> Result<Option<Record>, AppError>;

    /// Atomically adds `delta` to a counter field.
    ///
    /// Returns the new value, or `Ok(None)` if no record exists for `short_id`
    /// (in which case nothing is created).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the backend fails.
    async fn increment_counter(
        &self,
        short_id: &str,
        field: CounterField,
        delta: u64,
    ) -> Result<Option<u64>, AppError>;

    /// Reports whether the backend is reachable.
    async fn health_check(&self) -> bool;
}
