//! Shopping cart line entity.

use crate::{CartLineId, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line in a user's shopping cart: one `(user, product)` pair with a
/// positive quantity. The relational store is authoritative; the per-user
/// cart cache is a derived view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Store-assigned identifier.
    pub id: CartLineId,

    /// Owning user.
    pub user_id: UserId,

    /// Referenced catalog product.
    pub product_id: ProductId,

    /// Units in the cart; a line never persists with quantity <= 0.
    pub quantity: i32,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl CartLine {
    /// Checks ownership against the calling user.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// A cart line pending insertion (the store assigns the ID).
#[derive(Debug, Clone)]
pub struct NewCartLine {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl NewCartLine {
    /// Creates a new cart line stamped with the current time.
    #[must_use]
    pub fn new(user_id: UserId, product_id: ProductId, quantity: i32) -> Self {
        Self {
            user_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_check() {
        let owner = UserId::new();
        let line = CartLine {
            id: CartLineId(1),
            user_id: owner,
            product_id: ProductId::new_unchecked("65b2f1d04c6e7a0012345678"),
            quantity: 2,
            created_at: Utc::now(),
        };

        assert!(line.is_owned_by(owner));
        assert!(!line.is_owned_by(UserId::new()));
    }
}
