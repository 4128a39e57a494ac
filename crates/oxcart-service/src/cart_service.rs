//! Shopping cart domain logic.
//!
//! Per `(user, product)` pair the cart moves through exactly three states:
//! absent, present with positive quantity, absent again. The relational
//! store is authoritative; the per-user cart cache is kept synchronized on
//! every mutation and rebuilt from the store on any divergence.

use crate::cache::CartCache;
use crate::dto::{CartItemRequest, CartItemResponse, CartItemUpdateRequest};
use async_trait::async_trait;
use oxcart_core::{
    CartLine, CartLineId, NewCartLine, OxcartError, OxcartResult, ProductId, UserId, ValidateExt,
};
use oxcart_repository::{CartRepository, ProductStore, UserRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Shopping cart service.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Adds a quantity delta for a product: creates a line, merges into an
    /// existing one, or removes it when the merged quantity drops to zero.
    async fn add_item(
        &self,
        user_id: UserId,
        request: CartItemRequest,
    ) -> OxcartResult<CartItemResponse>;

    /// Overwrites a line's quantity (no merge).
    async fn update_item(
        &self,
        user_id: UserId,
        line_id: CartLineId,
        request: CartItemUpdateRequest,
    ) -> OxcartResult<CartItemResponse>;

    /// Deletes a line.
    async fn delete_item(&self, user_id: UserId, line_id: CartLineId) -> OxcartResult<()>;

    /// Empties the caller's cart. Rejects when the cart is already empty.
    async fn delete_all(&self, user_id: UserId) -> OxcartResult<()>;

    /// Reads a line, cache-first with store fallback.
    async fn get_item(
        &self,
        user_id: UserId,
        line_id: CartLineId,
    ) -> OxcartResult<CartItemResponse>;

    /// Lists the caller's cart from the authoritative store.
    async fn get_cart(&self, user_id: UserId) -> OxcartResult<Vec<CartItemResponse>>;
}

/// Cart service over the relational store, the catalog, and the cart cache.
pub struct CartServiceImpl<C, U, P> {
    carts: Arc<C>,
    users: Arc<U>,
    products: Arc<P>,
    cache: CartCache,
}

impl<C, U, P> CartServiceImpl<C, U, P>
where
    C: CartRepository,
    U: UserRepository,
    P: ProductStore,
{
    /// Creates a new cart service.
    pub fn new(carts: Arc<C>, users: Arc<U>, products: Arc<P>, cache: CartCache) -> Self {
        Self {
            carts,
            users,
            products,
            cache,
        }
    }

    async fn require_user(&self, user_id: UserId) -> OxcartResult<()> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(OxcartError::not_found("User", user_id))
        }
    }

    /// Loads a line cache-first, falling back to the store by primary key.
    /// Returns the line and whether it came from the store.
    async fn load_line(
        &self,
        user_id: UserId,
        line_id: CartLineId,
    ) -> OxcartResult<(CartLine, bool)> {
        if let Some(line) = self.cache.item(user_id, line_id).await {
            return Ok((line, false));
        }

        let line = self
            .carts
            .find_by_id(line_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("Shopping cart item", line_id))?;

        Ok((line, true))
    }

    /// Clears the whole-cart cache entry when the store says the cart is
    /// empty, so an emptied cart cannot linger as a stale non-empty list.
    async fn clear_cache_if_empty(&self, user_id: UserId) -> OxcartResult<()> {
        if self.carts.count_by_user(user_id).await? == 0 {
            self.cache.clear(user_id).await;
        }
        Ok(())
    }
}

#[async_trait]
impl<C, U, P> CartService for CartServiceImpl<C, U, P>
where
    C: CartRepository + 'static,
    U: UserRepository + 'static,
    P: ProductStore + 'static,
{
    async fn add_item(
        &self,
        user_id: UserId,
        request: CartItemRequest,
    ) -> OxcartResult<CartItemResponse> {
        debug!("Adding cart item for user {}: {:?}", user_id, request);

        request.validate_request()?;
        self.require_user(user_id).await?;

        let product_id = ProductId::parse(&request.product_id)?;
        self.products
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("Product", &product_id))?;

        match self
            .carts
            .find_by_user_and_product(user_id, &product_id)
            .await?
        {
            Some(mut line) => {
                // Repeat add: quantities accumulate; a negative delta is
                // the decrement path.
                line.quantity += request.quantity;

                if line.quantity <= 0 {
                    self.carts.delete(line.id).await?;
                    self.cache.remove_item(user_id, line.id).await;
                    self.clear_cache_if_empty(user_id).await?;

                    info!("Cart line {} removed by merge-to-zero", line.id);
                    return Ok(CartItemResponse::from(line));
                }

                self.carts.update_quantity(line.id, line.quantity).await?;
                self.cache.put_item(&line).await;

                Ok(CartItemResponse::from(line))
            }
            None => {
                if request.quantity <= 0 {
                    return Err(OxcartError::business_rule(
                        "Cannot add item with zero or negative quantity",
                    ));
                }

                let line = self
                    .carts
                    .insert(&NewCartLine::new(user_id, product_id, request.quantity))
                    .await?;
                self.cache.put_item(&line).await;

                info!("Cart line {} created for user {}", line.id, user_id);
                Ok(CartItemResponse::from(line))
            }
        }
    }

    async fn update_item(
        &self,
        user_id: UserId,
        line_id: CartLineId,
        request: CartItemUpdateRequest,
    ) -> OxcartResult<CartItemResponse> {
        debug!("Updating cart line {} for user {}", line_id, user_id);

        request.validate_request()?;
        self.require_user(user_id).await?;

        let (mut line, _) = self.load_line(user_id, line_id).await?;

        // The cache is not a trust boundary: ownership is checked no
        // matter where the line came from.
        if !line.is_owned_by(user_id) {
            return Err(OxcartError::forbidden(
                "You are not authorized to modify this shopping cart item",
            ));
        }

        line.quantity = request.quantity;
        self.carts.update_quantity(line_id, request.quantity).await?;
        self.cache.put_item(&line).await;

        Ok(CartItemResponse::from(line))
    }

    async fn delete_item(&self, user_id: UserId, line_id: CartLineId) -> OxcartResult<()> {
        debug!("Deleting cart line {} for user {}", line_id, user_id);

        let (line, _) = self.load_line(user_id, line_id).await?;

        if !line.is_owned_by(user_id) {
            return Err(OxcartError::forbidden(
                "You are not authorized to delete this shopping cart item",
            ));
        }

        self.carts.delete(line_id).await?;
        self.cache.remove_item(user_id, line_id).await;
        self.clear_cache_if_empty(user_id).await?;

        info!("Cart line {} deleted", line_id);
        Ok(())
    }

    async fn delete_all(&self, user_id: UserId) -> OxcartResult<()> {
        debug!("Emptying cart for user {}", user_id);

        self.require_user(user_id).await?;

        if self.carts.count_by_user(user_id).await? == 0 {
            // An empty-cart clear signals a caller bug, not a state change.
            return Err(OxcartError::business_rule("Shopping cart is already empty"));
        }

        let removed = self.carts.delete_by_user(user_id).await?;
        self.cache.clear(user_id).await;

        info!("Removed {} cart lines for user {}", removed, user_id);
        Ok(())
    }

    async fn get_item(
        &self,
        user_id: UserId,
        line_id: CartLineId,
    ) -> OxcartResult<CartItemResponse> {
        let (line, from_store) = self.load_line(user_id, line_id).await?;

        if !line.is_owned_by(user_id) {
            return Err(OxcartError::forbidden(
                "You are not authorized to see this shopping cart item",
            ));
        }

        // A store fallback hit repopulates the cache for the next read.
        if from_store {
            self.cache.put_item(&line).await;
        }

        Ok(CartItemResponse::from(line))
    }

    async fn get_cart(&self, user_id: UserId) -> OxcartResult<Vec<CartItemResponse>> {
        self.require_user(user_id).await?;

        let lines = self.carts.find_by_user(user_id).await?;
        Ok(lines.into_iter().map(CartItemResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheBackend;
    use crate::test_support::{
        test_product, test_user, MockCartRepository, MockProductStore, MockUserRepository,
    };
    use std::sync::atomic::Ordering;

    const PRODUCT_A: &str = "65b2f1d04c6e7a0012345678";
    const PRODUCT_B: &str = "65b2f1d04c6e7a0012345679";

    struct Fixture {
        service: CartServiceImpl<MockCartRepository, MockUserRepository, MockProductStore>,
        carts: Arc<MockCartRepository>,
        cache: CartCache,
        user_id: UserId,
    }

    fn fixture() -> Fixture {
        let user = test_user();
        let user_id = user.id;
        let carts = Arc::new(MockCartRepository::default());
        let users = Arc::new(MockUserRepository::with_user(user));
        let products = Arc::new(MockProductStore::with_products(vec![
            test_product(PRODUCT_A, 1000, 10),
            test_product(PRODUCT_B, 2500, 10),
        ]));
        let cache = CartCache::new(Arc::new(InMemoryCacheBackend::new()));

        Fixture {
            service: CartServiceImpl::new(carts.clone(), users, products, cache.clone()),
            carts,
            cache,
            user_id,
        }
    }

    fn add(product_id: &str, quantity: i32) -> CartItemRequest {
        CartItemRequest {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_first_add_creates_line_and_caches_it() {
        let f = fixture();

        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        assert_eq!(item.quantity, 2);

        // Line is in the store...
        assert_eq!(f.carts.line(item.id).unwrap().quantity, 2);
        // ...and the subsequent read is served from cache without a store hit.
        f.carts.find_by_id_calls.store(0, Ordering::SeqCst);
        let read = f.service.get_item(f.user_id, item.id).await.unwrap();
        assert_eq!(read.quantity, 2);
        assert_eq!(f.carts.find_by_id_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeat_adds_accumulate() {
        let f = fixture();

        f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 3)).await.unwrap();

        assert_eq!(item.quantity, 5);
        assert_eq!(f.carts.line(item.id).unwrap().quantity, 5);
        assert_eq!(f.cache.item(f.user_id, item.id).await.unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_negative_delta_decrements() {
        let f = fixture();

        f.service.add_item(f.user_id, add(PRODUCT_A, 5)).await.unwrap();
        let item = f.service.add_item(f.user_id, add(PRODUCT_A, -2)).await.unwrap();

        assert_eq!(item.quantity, 3);
    }

    #[tokio::test]
    async fn test_merge_to_zero_removes_line_and_clears_cache() {
        let f = fixture();

        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        f.service.add_item(f.user_id, add(PRODUCT_A, -2)).await.unwrap();

        // Gone from the store and the cache; whole-cart entry cleared.
        assert!(f.carts.line(item.id).is_none());
        assert!(f.cache.item(f.user_id, item.id).await.is_none());
        assert!(f.cache.user_cart(f.user_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_merge_below_zero_also_removes_line() {
        let f = fixture();

        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        f.service.add_item(f.user_id, add(PRODUCT_A, -5)).await.unwrap();

        assert!(f.carts.line(item.id).is_none());
    }

    #[tokio::test]
    async fn test_add_non_positive_quantity_to_absent_line_is_rejected() {
        let f = fixture();

        for quantity in [0, -1] {
            let result = f.service.add_item(f.user_id, add(PRODUCT_A, quantity)).await;
            match result.unwrap_err() {
                OxcartError::BusinessRule(msg) => {
                    assert!(msg.contains("zero or negative"))
                }
                other => panic!("Expected BusinessRule error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_rejected() {
        let f = fixture();

        let result = f
            .service
            .add_item(f.user_id, add("65b2f1d04c6e7a00ffffffff", 1))
            .await;
        assert!(matches!(result.unwrap_err(), OxcartError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_malformed_product_id_is_rejected() {
        let f = fixture();

        let result = f.service.add_item(f.user_id, add("not-hex", 1)).await;
        assert!(matches!(result.unwrap_err(), OxcartError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_for_unknown_user_is_rejected() {
        let f = fixture();

        let result = f.service.add_item(UserId::new(), add(PRODUCT_A, 1)).await;
        assert!(matches!(result.unwrap_err(), OxcartError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_overwrites_quantity_without_merge() {
        let f = fixture();

        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        let updated = f
            .service
            .update_item(f.user_id, item.id, CartItemUpdateRequest { quantity: 7 })
            .await
            .unwrap();

        assert_eq!(updated.quantity, 7);
        assert_eq!(f.carts.line(item.id).unwrap().quantity, 7);
    }

    #[tokio::test]
    async fn test_intruder_read_is_forbidden() {
        let f = fixture();
        let intruder = UserId::new();

        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();

        // The intruder's own cart cache is empty, so the line is served
        // from the store by primary key; ownership still rejects it.
        let result = f.service.get_item(intruder, item.id).await;
        assert!(matches!(result.unwrap_err(), OxcartError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_ownership_enforced_from_store() {
        let f = fixture();
        let intruder = test_user();
        let intruder_id = intruder.id;

        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();

        // Intruder bypasses the cache (their cart cache is empty) and the
        // line is found in the store by primary key.
        let result = f.service.delete_item(intruder_id, item.id).await;
        assert!(matches!(result.unwrap_err(), OxcartError::Forbidden(_)));
        // Line untouched.
        assert!(f.carts.line(item.id).is_some());
    }

    #[tokio::test]
    async fn test_delete_item_clears_whole_cart_entry_when_cart_empties() {
        let f = fixture();

        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        f.service.delete_item(f.user_id, item.id).await.unwrap();

        assert!(f.carts.line(item.id).is_none());
        assert!(f.cache.user_cart(f.user_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_item_keeps_cache_for_remaining_lines() {
        let f = fixture();

        let first = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        let second = f.service.add_item(f.user_id, add(PRODUCT_B, 1)).await.unwrap();

        f.service.delete_item(f.user_id, first.id).await.unwrap();

        let cart = f.cache.user_cart(f.user_id).await;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].id, second.id);
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let f = fixture();

        let result = f.service.delete_item(f.user_id, CartLineId(999)).await;
        assert!(matches!(result.unwrap_err(), OxcartError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_all_rejected_on_empty_cart() {
        let f = fixture();

        let result = f.service.delete_all(f.user_id).await;
        assert!(matches!(result.unwrap_err(), OxcartError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_delete_all_removes_store_lines_and_cache() {
        let f = fixture();

        f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        f.service.add_item(f.user_id, add(PRODUCT_B, 1)).await.unwrap();

        f.service.delete_all(f.user_id).await.unwrap();

        assert!(f.service.get_cart(f.user_id).await.unwrap().is_empty());
        assert!(f.cache.user_cart(f.user_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_item_store_fallback_repopulates_cache() {
        let f = fixture();

        let item = f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        // Simulate a cache wipe (eviction, restart).
        f.cache.clear(f.user_id).await;

        let read = f.service.get_item(f.user_id, item.id).await.unwrap();
        assert_eq!(read.quantity, 2);

        // The fallback hit repopulated the cache.
        assert_eq!(f.cache.item(f.user_id, item.id).await.unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_get_cart_lists_lines_in_insertion_order() {
        let f = fixture();

        f.service.add_item(f.user_id, add(PRODUCT_A, 2)).await.unwrap();
        f.service.add_item(f.user_id, add(PRODUCT_B, 1)).await.unwrap();

        let cart = f.service.get_cart(f.user_id).await.unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].product_id.as_str(), PRODUCT_A);
        assert_eq!(cart[1].product_id.as_str(), PRODUCT_B);
    }
}
