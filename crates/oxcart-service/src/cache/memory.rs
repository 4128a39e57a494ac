//! In-memory cache backend for tests and cache-less deployments.

use super::CacheBackend;
use async_trait::async_trait;
use oxcart_core::OxcartResult;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// In-memory cache backend with TTL support.
#[derive(Default)]
pub struct InMemoryCacheBackend {
    entries: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    value: String,
    expires_at: Instant,
}

impl InMemoryCacheBackend {
    /// Creates an empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    /// Whether the cache holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheBackend for InMemoryCacheBackend {
    async fn get_raw(&self, key: &str) -> OxcartResult<Option<String>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> OxcartResult<()> {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn touch(&self, key: &str, ttl: Duration) -> OxcartResult<()> {
        if let Some(entry) = self.entries.lock().unwrap().get_mut(key) {
            entry.expires_at = Instant::now() + ttl;
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> OxcartResult<bool> {
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove_round_trip() {
        let cache = InMemoryCacheBackend::new();
        cache
            .set_raw("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap(), Some("v".to_string()));
        assert!(cache.remove("k").await.unwrap());
        assert_eq!(cache.get_raw("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_noop() {
        let cache = InMemoryCacheBackend::new();
        assert!(!cache.remove("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_miss() {
        let cache = InMemoryCacheBackend::new();
        cache
            .set_raw("k", "v", Duration::from_millis(1))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.get_raw("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_touch_extends_expiry() {
        let cache = InMemoryCacheBackend::new();
        cache
            .set_raw("k", "v", Duration::from_millis(20))
            .await
            .unwrap();
        cache.touch("k", Duration::from_secs(60)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get_raw("k").await.unwrap(), Some("v".to_string()));
    }
}
