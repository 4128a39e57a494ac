//! Store trait definitions.
//!
//! Relational repositories own a pool handle and keep every multi-statement
//! mutation inside an explicit transaction (begin / commit, rollback on
//! drop); there is no ambient, request-scoped store context. Document store
//! traits cover the catalog side, which never participates in a relational
//! transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use oxcart_core::{
    CartLine, CartLineId, CatalogProduct, NewCartLine, Order, OrderId, OxcartResult, ProductId,
    ProductMedia, Review, ReviewId, UserId, UserProfile,
};
use rust_decimal::Decimal;

/// User repository over the relational store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user profile by ID.
    async fn find_by_id(&self, id: UserId) -> OxcartResult<Option<UserProfile>>;

    /// Checks if a user exists.
    async fn exists(&self, id: UserId) -> OxcartResult<bool>;

    /// Updates a user profile.
    async fn update(&self, profile: &UserProfile) -> OxcartResult<UserProfile>;
}

/// Cart line repository over the relational store.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Finds a cart line by primary key.
    async fn find_by_id(&self, id: CartLineId) -> OxcartResult<Option<CartLine>>;

    /// Finds the line for a `(user, product)` pair, if present.
    async fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: &ProductId,
    ) -> OxcartResult<Option<CartLine>>;

    /// Lists a user's cart lines, oldest first.
    async fn find_by_user(&self, user_id: UserId) -> OxcartResult<Vec<CartLine>>;

    /// Counts a user's cart lines.
    async fn count_by_user(&self, user_id: UserId) -> OxcartResult<u64>;

    /// Inserts a new line, returning it with the store-assigned ID.
    async fn insert(&self, line: &NewCartLine) -> OxcartResult<CartLine>;

    /// Overwrites a line's quantity.
    async fn update_quantity(&self, id: CartLineId, quantity: i32) -> OxcartResult<()>;

    /// Deletes a line; deleting an absent line is a no-op.
    async fn delete(&self, id: CartLineId) -> OxcartResult<bool>;

    /// Deletes all of a user's lines, returning the count removed.
    async fn delete_by_user(&self, user_id: UserId) -> OxcartResult<u64>;
}

/// Order repository over the relational store. All reads load lines; all
/// writes are transactional so no partial order is ever visible.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Finds an order (with lines) by primary key.
    async fn find_by_id(&self, id: OrderId) -> OxcartResult<Option<Order>>;

    /// Finds an order (with lines) by order number.
    async fn find_by_number(&self, order_number: &str) -> OxcartResult<Option<Order>>;

    /// Lists a user's orders (with lines), newest first.
    async fn find_by_user(&self, user_id: UserId) -> OxcartResult<Vec<Order>>;

    /// Inserts an order and its lines atomically, returning the persisted
    /// aggregate.
    async fn insert(&self, order: &Order) -> OxcartResult<Order>;

    /// Persists header changes and the current line set atomically.
    async fn update(&self, order: &Order) -> OxcartResult<Order>;

    /// Removes an order's lines, then the order, atomically.
    async fn delete(&self, id: OrderId) -> OxcartResult<()>;
}

/// A catalog product pending insertion (the store assigns the ID).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub stock_quantity: i32,
    pub ribbon: Option<String>,
    pub category: Option<String>,
    pub media: Vec<ProductMedia>,
}

/// Product store over the document database.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: &ProductId) -> OxcartResult<Option<CatalogProduct>>;

    /// Finds a product by SKU.
    async fn find_by_sku(&self, sku: &str) -> OxcartResult<Option<CatalogProduct>>;

    /// Lists products, optionally filtered by category.
    async fn list(&self, category: Option<&str>) -> OxcartResult<Vec<CatalogProduct>>;

    /// Inserts a product, returning it with the store-assigned ID.
    async fn insert(&self, product: NewProduct) -> OxcartResult<CatalogProduct>;

    /// Replaces a product document in full.
    async fn replace(&self, product: &CatalogProduct) -> OxcartResult<()>;

    /// Deletes a product; returns whether a document was removed.
    async fn delete(&self, id: &ProductId) -> OxcartResult<bool>;
}

/// A review pending insertion (the store assigns the ID).
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review store over the document database.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Finds a review by ID.
    async fn find_by_id(&self, id: &ReviewId) -> OxcartResult<Option<Review>>;

    /// Lists a product's reviews, newest first.
    async fn find_by_product(&self, product_id: &ProductId) -> OxcartResult<Vec<Review>>;

    /// Inserts a review, returning it with the store-assigned ID.
    async fn insert(&self, review: NewReview) -> OxcartResult<Review>;

    /// Replaces a review document in full.
    async fn replace(&self, review: &Review) -> OxcartResult<()>;

    /// Deletes a review; returns whether a document was removed.
    async fn delete(&self, id: &ReviewId) -> OxcartResult<bool>;
}
