//! Per-product review list cache.

use super::{keys, CacheBackend, CachePolicy, TypedCache};
use crate::dto::ReviewResponse;
use oxcart_core::ProductId;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// 30 minutes absolute.
const REVIEW_POLICY: CachePolicy = CachePolicy::absolute(Duration::from_secs(30 * 60));

/// Read-through cache for a product's review list under
/// `product:{id}:reviews`.
///
/// An empty list is never cached: an empty cached list would be
/// indistinguishable from a complete one and would mask inserts that land
/// before the entry expires. Mutations invalidate the list instead of
/// patching it.
#[derive(Clone)]
pub struct ReviewListCache {
    cache: TypedCache,
}

impl ReviewListCache {
    /// Creates a review list cache over a raw backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            cache: TypedCache::new(backend),
        }
    }

    /// Returns the cached review list, `None` on miss.
    pub async fn product_reviews(&self, product_id: &ProductId) -> Option<Vec<ReviewResponse>> {
        self.cache.get_list(&keys::product_reviews(product_id)).await
    }

    /// Caches the review list. Empty lists are dropped, not cached.
    pub async fn set_product_reviews(&self, product_id: &ProductId, reviews: &[ReviewResponse]) {
        if reviews.is_empty() {
            debug!(
                "Skipping cache population for empty review list: {}",
                product_id
            );
            return;
        }

        self.cache
            .set_list(&keys::product_reviews(product_id), reviews, &REVIEW_POLICY)
            .await;
    }

    /// Invalidates the cached list.
    pub async fn invalidate(&self, product_id: &ProductId) {
        self.cache.remove(&keys::product_reviews(product_id)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::super::InMemoryCacheBackend;
    use super::*;
    use crate::dto::tests::review_response;

    fn cache() -> ReviewListCache {
        ReviewListCache::new(Arc::new(InMemoryCacheBackend::new()))
    }

    #[tokio::test]
    async fn test_empty_list_is_never_cached() {
        let cache = cache();
        let product = ProductId::new_unchecked("65b2f1d04c6e7a0012345678");

        cache.set_product_reviews(&product, &[]).await;
        assert!(cache.product_reviews(&product).await.is_none());
    }

    #[tokio::test]
    async fn test_non_empty_list_round_trips() {
        let cache = cache();
        let product = ProductId::new_unchecked("65b2f1d04c6e7a0012345678");

        let reviews = vec![review_response(&product), review_response(&product)];
        cache.set_product_reviews(&product, &reviews).await;
        assert_eq!(cache.product_reviews(&product).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_next_read_through() {
        let cache = cache();
        let product = ProductId::new_unchecked("65b2f1d04c6e7a0012345678");

        cache
            .set_product_reviews(&product, &[review_response(&product)])
            .await;
        cache.invalidate(&product).await;
        assert!(cache.product_reviews(&product).await.is_none());
    }
}
