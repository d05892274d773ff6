//! PostgreSQL implementation of the record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::{CounterField, Record};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct RecordRow {
    short_id: String,
    target_url: String,
    created_at: DateTime<Utc>,
    click_count: i64,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Record {
            short_id: row.short_id,
            long_url: row.target_url,
            created_at: row.created_at,
            click_count: u64::try_from(row.click_count).unwrap_or_default(),
        }
    }
}

/// PostgreSQL record store.
///
/// One row per short identifier, keyed by `short_id`. The table name comes
/// from configuration, so statements are built at runtime after the name has
/// been checked with [`is_valid_table_name`]. Values are always bound.
pub struct PgRecordStore {
    pool: Arc<PgPool>,
    table: String,
}

impl PgRecordStore {
    /// Creates a store over `table`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `table` is not a plain SQL
    /// identifier.
    pub fn new(pool: Arc<PgPool>, table: impl Into<String>) -> Result<Self, AppError> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(AppError::validation(format!(
                "Invalid table name '{}'",
                table
            )));
        }

        Ok(Self { pool, table })
    }

    /// Creates the backing table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                short_id    TEXT PRIMARY KEY,
                target_url  TEXT NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                click_count BIGINT NOT NULL DEFAULT 0 CHECK (click_count >= 0)
            )
            "#,
            table = self.table
        );

        sqlx::query(&sql).execute(self.pool.as_ref()).await?;
        info!(table = %self.table, "Record table ready");
        Ok(())
    }
}

/// Returns `true` for names made of ASCII letters, digits and underscores,
/// not starting with a digit, at most 63 bytes long.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    name.len() <= 63
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn put_if_absent(&self, record: &Record) -> Result<bool, AppError> {
        let click_count = i64::try_from(record.click_count)
            .map_err(|_| AppError::store("click_count out of range"))?;

        let sql = format!(
            r#"
            INSERT INTO {} (short_id, target_url, created_at, click_count)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short_id) DO NOTHING
            "#,
            self.table
        );

        let result = sqlx::query(&sql)
            .bind(&record.short_id)
            .bind(&record.long_url)
            .bind(record.created_at)
            .bind(click_count)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, short_id: &str) -> Result<Option<Record>, AppError> {
        let sql = format!(
            "SELECT short_id, target_url, created_at, click_count FROM {} WHERE short_id = $1",
            self.table
        );

        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(short_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Record::from))
    }

    async fn increment_counter(
        &self,
        short_id: &str,
        field: CounterField,
        delta: u64,
    ) -> Result<Option<u64>, AppError> {
        let delta = i64::try_from(delta).map_err(|_| AppError::store("delta out of range"))?;

        // Single statement: the row lock makes concurrent increments serialize.
        let sql = format!(
            "UPDATE {table} SET {col} = {col} + $2 WHERE short_id = $1 RETURNING {col}",
            table = self.table,
            col = field.as_str()
        );

        let value: Option<i64> = sqlx::query_scalar(&sql)
            .bind(short_id)
            .bind(delta)
            .fetch_optional(self.pool.as_ref())
            .await?;

        debug!(short_id = %short_id, field = field.as_str(), ?value, "Counter incremented");

        Ok(value.map(|v| u64::try_from(v).unwrap_or_default()))
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_names() {
        assert!(is_valid_table_name("url_shortener"));
        assert!(is_valid_table_name("_records"));
        assert!(is_valid_table_name("Links2"));
    }

    #[test]
    fn test_invalid_table_names() {
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("1links"));
        assert!(!is_valid_table_name("links; DROP TABLE users"));
        assert!(!is_valid_table_name("public.links"));
        assert!(!is_valid_table_name("\"links\""));
        assert!(!is_valid_table_name(&"a".repeat(64)));
    }

    #[test]
    fn test_row_conversion() {
        let now = Utc::now();
        let record = Record::from(RecordRow {
            short_id: "abc".into(),
            target_url: "https://example.com".into(),
            created_at: now,
            click_count: 42,
        });

        assert_eq!(record.short_id, "abc");
        assert_eq!(record.long_url, "https://example.com");
        assert_eq!(record.created_at, now);
        assert_eq!(record.click_count, 42);
    }
}
