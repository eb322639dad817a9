use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use crate::core::config::store::{CONNECT_RETRIES, USERS_KEY};
use crate::core::error::StoreError;
use crate::storage::store::ProfileStore;

/// Profiles kept in one redis hash: field = chat identity, value = JSON.
///
/// The connection is established on first use, so an unreachable redis only
/// fails the interactions that touch the store. Once connected, the
/// `ConnectionManager` reconnects by itself after redis restarts.
pub struct RedisProfileStore {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
    hash_key: String,
}

impl RedisProfileStore {
    /// Store for `url` (`redis://host[:port][/db]`). Only parses the URL.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Self::with_hash_key(url, USERS_KEY)
    }

    /// Like [`open`](Self::open), storing profiles under `hash_key`.
    pub fn with_hash_key(url: &str, hash_key: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: OnceCell::new(),
            hash_key: hash_key.into(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let conn = ConnectionManager::new_with_backoff(self.client.clone(), 2, 100, CONNECT_RETRIES).await?;
                log::info!("Connected to redis profile store");
                Ok::<_, StoreError>(conn)
            })
            .await?;
        // ConnectionManager is a cheap handle; commands need it mutably.
        Ok(conn.clone())
    }
}

#[async_trait]
impl ProfileStore for RedisProfileStore {
    fn name(&self) -> &str {
        "redis"
    }

    async fn read_raw(&self, identity: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await.inspect_err(|e| {
            log::error!("redis unavailable for HGET {} {}: {}", self.hash_key, identity, e);
        })?;
        let value: Option<String> = conn.hget(&self.hash_key, identity).await.map_err(|e| {
            log::error!("HGET {} {} failed: {}", self.hash_key, identity, e);
            e
        })?;
        Ok(value)
    }

    async fn write_raw(&self, identity: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await.inspect_err(|e| {
            log::error!("redis unavailable for HSET {} {}: {}", self.hash_key, identity, e);
        })?;
        let _: () = conn.hset(&self.hash_key, identity, value).await.map_err(|e| {
            log::error!("HSET {} {} failed: {}", self.hash_key, identity, e);
            e
        })?;
        Ok(())
    }
}
