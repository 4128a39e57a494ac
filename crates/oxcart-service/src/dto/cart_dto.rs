//! Shopping cart DTOs.

use chrono::{DateTime, Utc};
use oxcart_core::{CartLine, CartLineId, ProductId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to add a quantity delta for a product to the caller's cart.
///
/// A negative quantity is a decrement against an existing line; adding a
/// non-positive quantity for a product not yet in the cart is rejected by
/// the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartItemRequest {
    #[validate(length(equal = 24, message = "Invalid product ID format"))]
    pub product_id: String,

    pub quantity: i32,
}

/// Request to overwrite a cart line's quantity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartItemUpdateRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Cart line response DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemResponse {
    pub id: CartLineId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            user_id: line.user_id,
            product_id: line.product_id,
            quantity: line.quantity,
            created_at: line.created_at,
        }
    }
}
