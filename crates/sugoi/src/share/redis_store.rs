//! Redis hash backend for share records.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{debug, info};

use super::store::{RecordFields, ShareRecordStore, StoreError};

/// Share record store keeping each record as one Redis hash.
#[derive(Clone)]
pub struct RedisShareStore {
    /// Reconnecting connection shared by every request.
    conn: ConnectionManager,
}

impl RedisShareStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        info!(url = %mask_redis_url(url), "connecting to redis");

        let client = Client::open(url).map_err(map_err)?;
        let conn = ConnectionManager::new(client).await.map_err(map_err)?;

        info!("connected to redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl ShareRecordStore for RedisShareStore {
    async fn set(&self, key: &str, fields: RecordFields) -> Result<(), StoreError> {
        let items: Vec<(&str, &str)> = fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect();
        let mut conn = self.conn.clone();

        // DEL + HSET in one MULTI so fields of an overwritten record never linger.
        let _: () = redis::pipe()
            .atomic()
            .del(key)
            .ignore()
            .hset_multiple(key, &items)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_err)?;

        debug!(key, fields = items.len(), "stored share record");
        Ok(())
    }

    async fn get_all(&self, key: &str) -> Result<Option<RecordFields>, StoreError> {
        let mut conn = self.conn.clone();
        let fields: RecordFields = conn.hgetall(key).await.map_err(map_err)?;

        if fields.is_empty() {
            Ok(None)
        } else {
            Ok(Some(fields))
        }
    }
}

fn map_err(err: redis::RedisError) -> StoreError {
    StoreError::Unavailable(format!("redis error: {err}"))
}

/// Mask the password in a Redis URL for safe logging.
pub(crate) fn mask_redis_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
