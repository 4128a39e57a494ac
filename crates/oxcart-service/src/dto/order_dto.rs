//! Order DTOs.

use chrono::{DateTime, Utc};
use oxcart_core::{Order, OrderId, OrderLine, OrderStatus, PaymentStatus, ProductId, ShippingAddress, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One requested line at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemCreate {
    #[validate(length(equal = 24, message = "Invalid product ID format"))]
    pub product_id: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Checkout request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreateRequest {
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub order_items: Vec<OrderItemCreate>,

    pub payment_method: Option<String>,

    #[validate(length(min = 1, message = "Shipping address is required"))]
    pub shipping_line1: String,
    pub shipping_line2: Option<String>,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_country: String,
    pub shipping_postal_code: String,

    pub delivery_fee: Decimal,
}

impl OrderCreateRequest {
    /// Assembles the shipping address fields.
    #[must_use]
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            line1: self.shipping_line1.clone(),
            line2: self.shipping_line2.clone(),
            city: self.shipping_city.clone(),
            state: self.shipping_state.clone(),
            country: self.shipping_country.clone(),
            postal_code: self.shipping_postal_code.clone(),
        }
    }
}

/// One patched line on order update. Quantity 0 (or less) drops the line.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemPatch {
    #[validate(length(equal = 24, message = "Invalid product ID format"))]
    pub product_id: String,

    pub quantity: i32,
}

/// Partial order update. Absent fields leave existing values untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderUpdateRequest {
    pub status: Option<OrderStatus>,
    pub payment_method: Option<String>,
    pub shipping_line1: Option<String>,
    pub shipping_line2: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_country: Option<String>,
    pub shipping_postal_code: Option<String>,

    #[validate(nested)]
    pub order_items: Option<Vec<OrderItemPatch>>,
}

/// Order line response DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub id: i64,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            product_name: line.product_name,
            product_price: line.product_price,
            quantity: line.quantity,
            line_total: line.line_total,
        }
    }
}

/// Order response DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub shipping_address: ShippingAddress,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub items: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            order_number: order.order_number,
            order_date: order.order_date,
            status: order.status,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            shipping_address: order.shipping_address,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
            items: order.lines.into_iter().map(OrderLineResponse::from).collect(),
        }
    }
}
