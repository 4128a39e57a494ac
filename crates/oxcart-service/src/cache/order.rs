//! Per-user order list cache.

use super::{keys, CacheBackend, CachePolicy, TypedCache};
use crate::dto::OrderResponse;
use oxcart_core::UserId;
use std::sync::Arc;
use std::time::Duration;

/// 3 days absolute.
const ORDER_POLICY: CachePolicy = CachePolicy::absolute(Duration::from_secs(3 * 24 * 60 * 60));

/// Best-effort cache of a user's order list under `order:{userId}`.
///
/// Replacing one order in the list means fetching the whole list,
/// rebuilding it in memory, and overwriting the entry; the fetched list is
/// an independent deserialized copy and is never mutated in place.
#[derive(Clone)]
pub struct OrderListCache {
    cache: TypedCache,
}

impl OrderListCache {
    /// Creates an order list cache over a raw backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            cache: TypedCache::new(backend),
        }
    }

    /// Returns the cached order list, `None` on miss.
    pub async fn user_orders(&self, user_id: UserId) -> Option<Vec<OrderResponse>> {
        self.cache.get_list(&keys::user_orders(user_id)).await
    }

    /// Overwrites the cached order list.
    pub async fn set_user_orders(&self, user_id: UserId, orders: &[OrderResponse]) {
        self.cache
            .set_list(&keys::user_orders(user_id), orders, &ORDER_POLICY)
            .await;
    }

    /// Replaces the matching order in the cached list, if the list is
    /// cached at all. Position is preserved; a miss stays a miss.
    pub async fn replace_order(&self, order: &OrderResponse) {
        let Some(orders) = self.user_orders(order.user_id).await else {
            return;
        };

        let rebuilt: Vec<OrderResponse> = orders
            .into_iter()
            .map(|cached| {
                if cached.id == order.id {
                    order.clone()
                } else {
                    cached
                }
            })
            .collect();

        self.set_user_orders(order.user_id, &rebuilt).await;
    }

    /// Drops the cached list.
    pub async fn clear(&self, user_id: UserId) {
        self.cache.remove(&keys::user_orders(user_id)).await;
    }
}
