//! Per-user shopping cart cache.
//!
//! The whole cart is stored as one list under `cart:{userId}`. Cart
//! membership changes on nearly every request, so mutations always fetch
//! the current list, rebuild it in memory, and overwrite the entry; a
//! fetched list is a deserialized copy, never mutated in place.

use super::{keys, CacheBackend, CachePolicy, TypedCache};
use oxcart_core::{CartLine, CartLineId, UserId};
use std::sync::Arc;
use std::time::Duration;

/// 7 days absolute, re-armed on read within a 24 hour sliding window.
const CART_POLICY: CachePolicy = CachePolicy::absolute_and_sliding(
    Duration::from_secs(7 * 24 * 60 * 60),
    Duration::from_secs(24 * 60 * 60),
);

/// Whole-cart-as-list cache.
#[derive(Clone)]
pub struct CartCache {
    cache: TypedCache,
}

impl CartCache {
    /// Creates a cart cache over a raw backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            cache: TypedCache::new(backend),
        }
    }

    /// Returns the cached cart. A miss reads as an empty cart; the caller
    /// falls back to the store for authoritative state.
    pub async fn user_cart(&self, user_id: UserId) -> Vec<CartLine> {
        self.cache
            .get_list(&keys::cart(user_id))
            .await
            .unwrap_or_default()
    }

    /// Returns a single cached line by ID.
    pub async fn item(&self, user_id: UserId, line_id: CartLineId) -> Option<CartLine> {
        self.user_cart(user_id)
            .await
            .into_iter()
            .find(|line| line.id == line_id)
    }

    /// Inserts or replaces a line in the user's cached cart.
    pub async fn put_item(&self, line: &CartLine) {
        let mut cart = self.user_cart(line.user_id).await;
        match cart.iter_mut().find(|cached| cached.id == line.id) {
            Some(cached) => *cached = line.clone(),
            None => cart.push(line.clone()),
        }
        self.cache
            .set_list(&keys::cart(line.user_id), &cart, &CART_POLICY)
            .await;
    }

    /// Removes a line from the user's cached cart; absent lines are a no-op.
    pub async fn remove_item(&self, user_id: UserId, line_id: CartLineId) {
        let cart = self.user_cart(user_id).await;
        let rebuilt: Vec<CartLine> = cart.into_iter().filter(|line| line.id != line_id).collect();
        self.cache
            .set_list(&keys::cart(user_id), &rebuilt, &CART_POLICY)
            .await;
    }

    /// Drops the whole cart entry. Used when the cart empties, so an empty
    /// cart and a cache miss both read as empty on the next fetch.
    pub async fn clear(&self, user_id: UserId) {
        self.cache.remove(&keys::cart(user_id)).await;
    }
}
