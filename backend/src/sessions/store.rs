//! Session store backends
//!
//! Sessions live in Redis, keyed by a digest of the session token. When Redis
//! is unreachable at startup the server falls back to a process-local memory
//! store so development and tests can run without external services.

use crate::sessions::SessionData;
use anyhow::{Context, Result};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Storage backend for serialized session payloads
#[derive(Clone)]
pub enum SessionBackend {
    Redis(ConnectionManager),
    Memory(MemoryStore),
}

impl SessionBackend {
    /// Process-local fallback store
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    pub(crate) async fn load(&self, key: &str) -> Result<Option<SessionData>> {
        match self {
            Self::Redis(conn) => {
                let mut conn = conn.clone();
                let raw: Option<String> = conn
                    .get(redis_key(key))
                    .await
                    .context("failed to read session from redis")?;
                match raw {
                    Some(json) => Ok(Some(
                        serde_json::from_str(&json).context("corrupt session payload")?,
                    )),
                    None => Ok(None),
                }
            }
            Self::Memory(store) => Ok(store.load(key).await),
        }
    }

    pub(crate) async fn save(&self, key: &str, data: &SessionData, ttl: Duration) -> Result<()> {
        match self {
            Self::Redis(conn) => {
                let mut conn = conn.clone();
                let json = serde_json::to_string(data).context("failed to serialize session")?;
                let _: () = conn
                    .set_ex(redis_key(key), json, ttl.as_secs())
                    .await
                    .context("failed to write session to redis")?;
                Ok(())
            }
            Self::Memory(store) => {
                store.save(key, data.clone(), ttl).await;
                Ok(())
            }
        }
    }

    /// Short human-readable name of the backend, for logs and probes
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Redis(_) => "redis",
            Self::Memory(_) => "memory",
        }
    }

    /// Check that the store is reachable. The memory store always is.
    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Redis(conn) => {
                let mut conn = conn.clone();
                let _: String = redis::cmd("PING")
                    .query_async(&mut conn)
                    .await
                    .context("session store ping failed")?;
                Ok(())
            }
            Self::Memory(_) => Ok(()),
        }
    }

    pub(crate) async fn delete(&self, key: &str) -> Result<()> {
        match self {
            Self::Redis(conn) => {
                let mut conn = conn.clone();
                let _: () = conn
                    .del(redis_key(key))
                    .await
                    .context("failed to delete session from redis")?;
                Ok(())
            }
            Self::Memory(store) => {
                store.delete(key).await;
                Ok(())
            }
        }
    }
}

fn redis_key(key: &str) -> String {
    format!("session:{key}")
}

/// In-process session store used when Redis is unavailable
///
/// Expiry is handled natively by Redis; here expired entries are dropped
/// when they are next read.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, MemoryEntry>>>,
}

struct MemoryEntry {
    data: SessionData,
    expires_at: Instant,
}

impl MemoryStore {
    async fn load(&self, key: &str) -> Option<SessionData> {
        let mut map = self.inner.write().await;
        match map.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.data.clone()),
            Some(_) => {
                map.remove(key);
                None
            }
            None => None,
        }
    }

    async fn save(&self, key: &str, data: SessionData, ttl: Duration) {
        let mut map = self.inner.write().await;
        map.insert(
            key.to_string(),
            MemoryEntry {
                data,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    async fn delete(&self, key: &str) {
        self.inner.write().await.remove(key);
    }
}
