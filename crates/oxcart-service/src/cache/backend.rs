//! Raw cache backend trait and the Redis implementation.

use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use oxcart_core::{OxcartError, OxcartResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Raw string-keyed cache backend.
///
/// Implementations store opaque strings with a TTL; typed semantics and
/// failure swallowing live in [`TypedCache`](super::TypedCache). The raw
/// trait returns `Result` so tests can assert on backend behavior.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Get a raw value. Returns `None` if the key doesn't exist or expired.
    async fn get_raw(&self, key: &str) -> OxcartResult<Option<String>>;

    /// Set a raw value with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> OxcartResult<()>;

    /// Reset a key's TTL without touching its value.
    async fn touch(&self, key: &str, ttl: Duration) -> OxcartResult<()>;

    /// Remove a key. Removing an absent key is a no-op; returns whether the
    /// key existed.
    async fn remove(&self, key: &str) -> OxcartResult<bool>;
}

/// Redis-backed cache.
pub struct RedisCacheBackend {
    /// Redis connection pool; `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheBackend {
    /// Creates a new Redis cache backend.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Creates a no-op cache backend (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    async fn conn(&self) -> OxcartResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| OxcartError::Cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(OxcartError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> OxcartResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| OxcartError::Cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> OxcartResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| OxcartError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn touch(&self, key: &str, ttl: Duration) -> OxcartResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.conn().await?;
        let ttl_secs = ttl.as_secs().max(1) as i64;

        conn.expire::<_, ()>(key, ttl_secs)
            .await
            .map_err(|e| OxcartError::Cache(format!("Failed to touch key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> OxcartResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| OxcartError::Cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_backend_is_a_noop() {
        let backend = RedisCacheBackend::disabled();
        assert!(!backend.is_enabled());
        assert_eq!(backend.get_raw("k").await.unwrap(), None);
        backend
            .set_raw("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!backend.remove("k").await.unwrap());
    }
}
