//! Catalog product entity.

use crate::ProductId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A media record attached to a product, kept in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMedia {
    /// Public URL of the asset.
    pub url: String,
    /// Media kind (image, video, ...).
    pub media_type: String,
    /// Position within the product's gallery.
    pub sort_order: i32,
}

/// Catalog product, owned by the document store.
///
/// `in_stock` is intended to track `stock_quantity > 0` but is only
/// recomputed where the quantity itself changes; the async stock
/// reconciliation path is the main writer (see the inventory worker).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Document identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Long-form description.
    pub description: String,

    /// Stock keeping unit, unique across the catalog.
    pub sku: String,

    /// List price.
    pub price: Decimal,

    /// Promotional price; when set and positive it overrides `price`.
    pub compare_price: Option<Decimal>,

    /// Units on hand.
    pub stock_quantity: i32,

    /// Denormalized availability flag.
    pub in_stock: bool,

    /// Optional ribbon label ("sale", "new", ...).
    pub ribbon: Option<String>,

    /// Optional category tag.
    pub category: Option<String>,

    /// Ordered media gallery.
    pub media: Vec<ProductMedia>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CatalogProduct {
    /// Returns the price an order line should snapshot: the compare price
    /// when one is set and positive, the list price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.compare_price {
            Some(compare) if compare > Decimal::ZERO => compare,
            _ => self.price,
        }
    }

    /// Checks whether the requested quantity can currently be fulfilled.
    #[must_use]
    pub const fn has_stock_for(&self, quantity: i32) -> bool {
        self.stock_quantity >= quantity
    }

    /// Applies a stock decrement if strictly more units than `quantity` are
    /// on hand, recomputing the availability flag. Returns whether the
    /// decrement was applied.
    ///
    /// The strict comparison bounds the damage of duplicate delivery from
    /// the inventory queue; it does not make the operation idempotent.
    pub fn decrement_stock(&mut self, quantity: i32) -> bool {
        if self.stock_quantity > quantity {
            self.stock_quantity -= quantity;
            self.in_stock = self.stock_quantity > 0;
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }
}
