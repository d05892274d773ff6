//! Redis implementation of the record store.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::domain::entities::{CounterField, Record};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;

const FIELD_TARGET_URL: &str = "target_url";
const FIELD_CREATED_AT: &str = "created_at";

const PUT_IF_ABSENT_LUA: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return 0
end
redis.call('HSET', KEYS[1], 'target_url', ARGV[1], 'created_at', ARGV[2], 'click_count', ARGV[3])
return 1
"#;

const INCREMENT_LUA: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return redis.call('HINCRBY', KEYS[1], ARGV[1], ARGV[2])
end
return false
"#;

/// Redis record store.
///
/// Each record is a hash at `{prefix}:{short_id}`. Conditional insert and
/// increment run as Lua scripts so the existence check and the write happen
/// in one server-side step.
pub struct RedisRecordStore {
    conn: ConnectionManager,
    prefix: String,
    put_script: Script,
    increment_script: Script,
}

impl RedisRecordStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the URL is invalid, the connection
    /// cannot be established or the PING fails.
    pub async fn connect(redis_url: &str, prefix: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        conn.ping::<()>().await?;

        let prefix = prefix.into();
        info!(prefix = %prefix, "Connected to Redis record store");

        Ok(Self {
            conn: manager,
            prefix,
            put_script: Script::new(PUT_IF_ABSENT_LUA),
            increment_script: Script::new(INCREMENT_LUA),
        })
    }

    fn key(&self, short_id: &str) -> String {
        record_key(&self.prefix, short_id)
    }
}

fn record_key(prefix: &str, short_id: &str) -> String {
    format!("{}:{}", prefix, short_id)
}

fn parse_record(short_id: &str, fields: HashMap<String, String>) -> Result<Record, AppError> {
    let long_url = fields
        .get(FIELD_TARGET_URL)
        .cloned()
        .ok_or_else(|| AppError::store(format!("record {} has no target_url", short_id)))?;

    let created_at = fields
        .get(FIELD_CREATED_AT)
        .map(|raw| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
        .transpose()
        .map_err(|e| AppError::store(format!("record {} has bad created_at: {}", short_id, e)))?
        .unwrap_or_else(Utc::now);

    let click_count = fields
        .get(CounterField::ClickCount.as_str())
        .map(|raw| raw.parse::<u64>())
        .transpose()
        .map_err(|e| AppError::store(format!("record {} has bad click_count: {}", short_id, e)))?
        .unwrap_or(0);

    Ok(Record {
        short_id: short_id.to_string(),
        long_url,
        created_at,
        click_count,
    })
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn put_if_absent(&self, record: &Record) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();

        let inserted: i64 = self
            .put_script
            .key(self.key(&record.short_id))
            .arg(&record.long_url)
            .arg(
                record
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
            )
            .arg(record.click_count)
            .invoke_async(&mut conn)
            .await?;

        Ok(inserted == 1)
    }

    async fn get(&self, short_id: &str) -> Result<Option<Record>, AppError> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn.hgetall(self.key(short_id)).await?;

        if fields.is_empty() {
            return Ok(None);
        }

        parse_record(short_id, fields).map(Some)
    }

    async fn increment_counter(
        &self,
        short_id: &str,
        field: CounterField,
        delta: u64,
    ) -> Result<Option<u64>, AppError> {
        let mut conn = self.conn.clone();

        let value: Option<i64> = self
            .increment_script
            .key(self.key(short_id))
            .arg(field.as_str())
            .arg(delta)
            .invoke_async(&mut conn)
            .await?;

        debug!(short_id = %short_id, field = field.as_str(), ?value, "Counter incremented");

        Ok(value.map(|v| u64::try_from(v).unwrap_or_default()))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
