//! Record store implementations.
//!
//! Concrete implementations of [`RecordStore`](crate::domain::repositories::RecordStore):
//!
//! - [`InMemoryRecordStore`] - Process-local `DashMap`, for development and tests
//! - [`PgRecordStore`] - PostgreSQL via SQLx
//! - [`RedisRecordStore`] - Redis hashes with Lua-scripted writes
//!
//! [`connect_store`] builds the one selected by configuration.

pub mod memory_record_store;
pub mod pg_record_store;
pub mod redis_record_store;

pub use memory_record_store::InMemoryRecordStore;
pub use pg_record_store::{PgRecordStore, is_valid_table_name};
pub use redis_record_store::RedisRecordStore;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::RecordStore;

/// Connects the record store selected by `config.store_backend`.
///
/// PostgreSQL gets its table created if missing; Redis is checked with a PING.
///
/// # Errors
///
/// Returns an error if the backend URL is missing or the connection fails.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn RecordStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; records are lost on restart");
            Ok(Arc::new(InMemoryRecordStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not configured")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            tracing::info!("Connected to database");

            let store = PgRecordStore::new(Arc::new(pool), config.table_name.clone())?;
            store
                .ensure_schema()
                .await
                .context("Failed to create record table")?;

            Ok(Arc::new(store))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is not configured")?;

            let store = RedisRecordStore::connect(url, config.table_name.clone())
                .await
                .context("Failed to connect to Redis")?;

            Ok(Arc::new(store))
        }
    }
}
