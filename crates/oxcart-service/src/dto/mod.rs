//! Request and response DTOs.

mod cart_dto;
mod order_dto;
mod payment_dto;
mod product_dto;
mod review_dto;
mod user_dto;

pub use cart_dto::*;
pub use order_dto::*;
pub use payment_dto::*;
pub use product_dto::*;
pub use review_dto::*;
pub use user_dto::*;

/// Response fixtures shared across unit tests.
#[cfg(test)]
pub mod tests {
    use super::*;
    use chrono::Utc;
    use oxcart_core::{
        OrderId, OrderStatus, PaymentStatus, ProductId, ReviewId, ShippingAddress, UserId,
        UserRole,
    };
    use rust_decimal::Decimal;

    pub fn order_response(id: OrderId, user_id: UserId) -> OrderResponse {
        OrderResponse {
            id,
            user_id,
            order_number: format!("ORD-20250101000000-{:06x}", id.into_inner()),
            order_date: Utc::now(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: Some("card".to_string()),
            shipping_address: ShippingAddress::default(),
            subtotal: Decimal::new(1000, 2),
            delivery_fee: Decimal::new(500, 2),
            total: Decimal::new(1500, 2),
            items: vec![],
        }
    }

    pub fn product_response(id: &str) -> ProductResponse {
        let now = Utc::now();
        ProductResponse {
            id: ProductId::new_unchecked(id),
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            sku: "WID-001".to_string(),
            price: Decimal::new(1000, 2),
            compare_price: None,
            stock_quantity: 5,
            in_stock: true,
            ribbon: None,
            category: None,
            media: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn review_response(product_id: &ProductId) -> ReviewResponse {
        let now = Utc::now();
        ReviewResponse {
            id: ReviewId::new_unchecked("65b2f1d04c6e7a0098765432"),
            product_id: product_id.clone(),
            user_id: UserId::new(),
            rating: 5,
            title: Some("Great".to_string()),
            content: "Works as expected".to_string(),
            image_url: None,
            created_at: now,
        }
    }

    pub fn user_info_response(id: UserId) -> UserInfoResponse {
        UserInfoResponse {
            id,
            email: "user@example.com".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
            role: UserRole::Customer,
            created_at: Utc::now(),
        }
    }
}
