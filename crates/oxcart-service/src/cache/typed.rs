//! Typed cache over a raw backend, with expiration policies and
//! refresh-on-read.

use super::CacheBackend;
use chrono::{DateTime, Utc};
use oxcart_core::OxcartResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Expiration policy for a cache entry: absolute, sliding, or both.
///
/// With both set, every successful read re-arms the sliding window, but
/// never past the absolute deadline fixed at write time.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    absolute: Option<Duration>,
    sliding: Option<Duration>,
}

impl CachePolicy {
    /// Entry expires at a fixed point after the write.
    #[must_use]
    pub const fn absolute(ttl: Duration) -> Self {
        Self {
            absolute: Some(ttl),
            sliding: None,
        }
    }

    /// Entry expires after a window of inactivity; reads reset the window.
    #[must_use]
    pub const fn sliding(window: Duration) -> Self {
        Self {
            absolute: None,
            sliding: Some(window),
        }
    }

    /// Sliding window capped by an absolute deadline.
    #[must_use]
    pub const fn absolute_and_sliding(ttl: Duration, window: Duration) -> Self {
        Self {
            absolute: Some(ttl),
            sliding: Some(window),
        }
    }

    fn initial_ttl(&self) -> Duration {
        match (self.absolute, self.sliding) {
            (Some(absolute), Some(sliding)) => sliding.min(absolute),
            (Some(absolute), None) => absolute,
            (None, Some(sliding)) => sliding,
            // Unreachable through the constructors; fall back to a minute.
            (None, None) => Duration::from_secs(60),
        }
    }
}

/// Stored alongside every value so a read can re-arm the TTL.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    absolute_deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sliding_secs: Option<u64>,
}

/// Typed cache facade shared by all entity caches.
///
/// The cache is advisory: every failure is logged and degraded, so `get`
/// returns `None` and writes return `()` no matter what the backend does.
/// Callers must always be able to rebuild state from the source store.
#[derive(Clone)]
pub struct TypedCache {
    backend: Arc<dyn CacheBackend>,
}

impl TypedCache {
    /// Creates a typed cache over a raw backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    /// Gets a typed value; a hit refreshes the entry's sliding window.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get_inner(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache read for '{}' failed, treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Gets a typed list; same semantics as [`get`](Self::get).
    pub async fn get_list<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        self.get(key).await
    }

    /// Sets a typed value under the given policy.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, policy: &CachePolicy) {
        if let Err(e) = self.set_inner(key, value, policy).await {
            warn!("Cache write for '{}' failed, dropping: {}", key, e);
        }
    }

    /// Sets a typed list under the given policy.
    pub async fn set_list<T: Serialize>(&self, key: &str, values: &[T], policy: &CachePolicy) {
        self.set(key, &values, policy).await;
    }

    /// Removes a key; removing an absent key is a no-op.
    pub async fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key).await {
            warn!("Cache remove for '{}' failed, dropping: {}", key, e);
        }
    }

    async fn get_inner<T: DeserializeOwned>(&self, key: &str) -> OxcartResult<Option<T>> {
        let Some(raw) = self.backend.get_raw(key).await? else {
            return Ok(None);
        };

        let envelope: CacheEnvelope = serde_json::from_str(&raw)?;

        // Refresh-on-read: re-arm the sliding window, capped by the
        // absolute deadline fixed at write time.
        if let Some(sliding_secs) = envelope.sliding_secs {
            let mut ttl = Duration::from_secs(sliding_secs);
            if let Some(deadline) = envelope.absolute_deadline {
                let remaining = (deadline - Utc::now()).to_std().unwrap_or(Duration::ZERO);
                if remaining.is_zero() {
                    let _ = self.backend.remove(key).await;
                    return Ok(None);
                }
                ttl = ttl.min(remaining);
            }
            self.backend.touch(key, ttl).await?;
        }

        let value: T = serde_json::from_value(envelope.value)?;
        Ok(Some(value))
    }

    async fn set_inner<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        policy: &CachePolicy,
    ) -> OxcartResult<()> {
        let envelope = CacheEnvelope {
            value: serde_json::to_value(value)?,
            absolute_deadline: policy
                .absolute
                .map(|d| Utc::now() + chrono::Duration::from_std(d).unwrap_or_default()),
            sliding_secs: policy.sliding.map(|d| d.as_secs()),
        };

        let raw = serde_json::to_string(&envelope)?;
        self.backend.set_raw(key, &raw, policy.initial_ttl()).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::InMemoryCacheBackend;
    use super::*;

    fn cache() -> (TypedCache, Arc<InMemoryCacheBackend>) {
        let backend = Arc::new(InMemoryCacheBackend::new());
        (TypedCache::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (cache, _) = cache();
        let policy = CachePolicy::absolute(Duration::from_secs(60));

        cache.set("k", &42_i32, &policy).await;
        assert_eq!(cache.get::<i32>("k").await, Some(42));
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let (cache, _) = cache();
        assert_eq!(cache.get::<i32>("missing").await, None);
    }

    #[tokio::test]
    async fn test_list_round_trip_preserves_order() {
        let (cache, _) = cache();
        let policy = CachePolicy::absolute(Duration::from_secs(60));

        let values = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        cache.set_list("k", &values, &policy).await;
        assert_eq!(cache.get_list::<String>("k").await, Some(values));
    }

    #[tokio::test]
    async fn test_overwrite_is_unconditional() {
        let (cache, _) = cache();
        let policy = CachePolicy::absolute(Duration::from_secs(60));

        cache.set("k", &1_i32, &policy).await;
        cache.set("k", &2_i32, &policy).await;
        assert_eq!(cache.get::<i32>("k").await, Some(2));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (cache, _) = cache();
        let policy = CachePolicy::absolute(Duration::from_secs(60));

        cache.set("k", &1_i32, &policy).await;
        cache.remove("k").await;
        cache.remove("k").await;
        assert_eq!(cache.get::<i32>("k").await, None);
    }

    #[tokio::test]
    async fn test_sliding_read_rearms_ttl() {
        let (cache, _) = cache();
        let policy = CachePolicy::sliding(Duration::from_secs(60));

        cache.set("k", &1_i32, &policy).await;
        // A read must not consume the entry and must re-arm the window.
        assert_eq!(cache.get::<i32>("k").await, Some(1));
        assert_eq!(cache.get::<i32>("k").await, Some(1));
    }

    #[tokio::test]
    async fn test_sliding_rearm_capped_by_absolute_deadline() {
        let (cache, backend) = cache();
        // Absolute deadline already effectively passed relative to sliding.
        let policy =
            CachePolicy::absolute_and_sliding(Duration::from_millis(30), Duration::from_secs(3600));

        cache.set("k", &1_i32, &policy).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Past the absolute deadline the entry must read as a miss even if
        // the backend still holds bytes.
        assert_eq!(cache.get::<i32>("k").await, None);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_entry_degrades_to_miss() {
        let (cache, backend) = cache();
        backend
            .set_raw("k", "not-json", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get::<i32>("k").await, None);
    }
}
