//! Cache key generators for consistent key naming.

use oxcart_core::{ProductId, UserId};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "oxcart:cache";

/// Key for a single product.
#[must_use]
pub fn product(id: &ProductId) -> String {
    format!("{}:product:{}", CACHE_PREFIX, id)
}

/// Key for a product's review list.
#[must_use]
pub fn product_reviews(id: &ProductId) -> String {
    format!("{}:product:{}:reviews", CACHE_PREFIX, id)
}

/// Key for a user's order list.
#[must_use]
pub fn user_orders(user_id: UserId) -> String {
    format!("{}:order:{}", CACHE_PREFIX, user_id)
}

/// Key for a user's profile info.
#[must_use]
pub fn user_info(user_id: UserId) -> String {
    format!("{}:user:{}", CACHE_PREFIX, user_id)
}

/// Key for a user's whole cart.
#[must_use]
pub fn cart(user_id: UserId) -> String {
    format!("{}:cart:{}", CACHE_PREFIX, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_keys() {
        let id = ProductId::new_unchecked("65b2f1d04c6e7a0012345678");
        assert_eq!(product(&id), "oxcart:cache:product:65b2f1d04c6e7a0012345678");
        assert_eq!(
            product_reviews(&id),
            "oxcart:cache:product:65b2f1d04c6e7a0012345678:reviews"
        );
    }

    #[test]
    fn test_user_keys_embed_user_id() {
        let user = UserId::new();
        assert!(user_orders(user).contains(&user.to_string()));
        assert!(user_info(user).starts_with("oxcart:cache:user:"));
        assert!(cart(user).starts_with("oxcart:cache:cart:"));
    }
}
