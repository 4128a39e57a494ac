//! Single-product cache.

use super::{keys, CacheBackend, CachePolicy, TypedCache};
use crate::dto::ProductResponse;
use oxcart_core::ProductId;
use std::sync::Arc;
use std::time::Duration;

/// 30 minutes absolute.
const PRODUCT_POLICY: CachePolicy = CachePolicy::absolute(Duration::from_secs(30 * 60));

/// Read-through / write-through cache for individual products under
/// `product:{id}`. Reads populate on store hit, updates overwrite, deletes
/// invalidate.
#[derive(Clone)]
pub struct ProductCache {
    cache: TypedCache,
}

impl ProductCache {
    /// Creates a product cache over a raw backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            cache: TypedCache::new(backend),
        }
    }

    /// Returns the cached product, `None` on miss.
    pub async fn product(&self, id: &ProductId) -> Option<ProductResponse> {
        self.cache.get(&keys::product(id)).await
    }

    /// Overwrites the cached product.
    pub async fn set_product(&self, product: &ProductResponse) {
        self.cache
            .set(&keys::product(&product.id), product, &PRODUCT_POLICY)
            .await;
    }

    /// Invalidates the cached product.
    pub async fn remove_product(&self, id: &ProductId) {
        self.cache.remove(&keys::product(id)).await;
    }
}
