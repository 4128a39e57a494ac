//! Order aggregate: header, lines, and status transitions.

use crate::{CatalogProduct, OrderId, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status. `Success` is terminal: a completed order rejects
/// all further update and delete attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Success,
}

impl OrderStatus {
    /// Parses a status from its storage form.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "success" => Self::Success,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// Payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    /// Parses a payment status from its storage form.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Shipping address captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

/// One line of an order. Product name and price are snapshotted at the time
/// the line is written, so later catalog edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Store-assigned identifier (0 until persisted).
    pub id: i64,

    /// Owning order (0 until the order is persisted).
    pub order_id: i64,

    /// Referenced catalog product.
    pub product_id: ProductId,

    /// Product name snapshot.
    pub product_name: String,

    /// Unit price snapshot (compare price wins when positive).
    pub product_price: Decimal,

    /// Units ordered.
    pub quantity: i32,

    /// `product_price * quantity`.
    pub line_total: Decimal,
}

impl OrderLine {
    /// Builds a line by snapshotting the product's name and effective price.
    #[must_use]
    pub fn snapshot(product: &CatalogProduct, quantity: i32) -> Self {
        let price = product.effective_price();
        Self {
            id: 0,
            order_id: 0,
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_price: price,
            quantity,
            line_total: price * Decimal::from(quantity),
        }
    }

    /// Re-snapshots price and name from the product and overwrites quantity.
    pub fn resnapshot(&mut self, product: &CatalogProduct, quantity: i32) {
        let price = product.effective_price();
        self.product_name = product.name.clone();
        self.product_price = price;
        self.quantity = quantity;
        self.line_total = price * Decimal::from(quantity);
    }
}

/// Order aggregate root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier.
    pub id: OrderId,

    /// Owning user.
    pub user_id: UserId,

    /// Human-readable order number; unique, not strictly sequential.
    pub order_number: String,

    /// Checkout timestamp.
    pub order_date: DateTime<Utc>,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// Payment status.
    pub payment_status: PaymentStatus,

    /// Payment method label.
    pub payment_method: Option<String>,

    /// Shipping address.
    pub shipping_address: ShippingAddress,

    /// Sum of line totals.
    pub subtotal: Decimal,

    /// Flat delivery fee.
    pub delivery_fee: Decimal,

    /// `subtotal + delivery_fee`.
    pub total: Decimal,

    /// Ordered line items.
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Recomputes `subtotal` and `total` from the current line set. Must be
    /// called after every change to the line composition.
    pub fn recompute_totals(&mut self) {
        self.subtotal = self.lines.iter().map(|l| l.line_total).sum();
        self.total = self.subtotal + self.delivery_fee;
    }

    /// Checks ownership against the calling user.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Whether the order has reached its terminal state.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, OrderStatus::Success)
    }

    /// Applies the terminal transition: `Success` / `Completed`.
    pub fn complete(&mut self) {
        self.status = OrderStatus::Success;
        self.payment_status = PaymentStatus::Completed;
    }
}
