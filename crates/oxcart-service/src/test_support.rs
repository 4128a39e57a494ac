//! Hand-rolled store mocks shared by the service unit tests.

use async_trait::async_trait;
use chrono::Utc;
use oxcart_core::{
    CartLine, CartLineId, CatalogProduct, NewCartLine, Order, OrderId, OxcartResult, ProductId,
    Review, ReviewId, UserId, UserProfile, UserRole,
};
use oxcart_repository::{
    CartRepository, NewProduct, NewReview, OrderRepository, ProductStore, ReviewStore,
    UserRepository,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn test_user() -> UserProfile {
    UserProfile {
        id: UserId::new(),
        email: "user@example.com".to_string(),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        role: UserRole::Customer,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_product(id: &str, price_cents: i64, stock: i32) -> CatalogProduct {
    let now = Utc::now();
    CatalogProduct {
        id: ProductId::new_unchecked(id),
        name: format!("product-{}", &id[id.len() - 4..]),
        description: "test product".to_string(),
        sku: format!("SKU-{}", &id[id.len() - 4..]),
        price: Decimal::new(price_cents, 2),
        compare_price: None,
        stock_quantity: stock,
        in_stock: stock > 0,
        ribbon: None,
        category: None,
        media: vec![],
        created_at: now,
        updated_at: now,
    }
}

/// Mock user repository.
#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<HashMap<UserId, UserProfile>>,
}

impl MockUserRepository {
    pub fn with_user(user: UserProfile) -> Self {
        let repo = Self::default();
        repo.users.lock().unwrap().insert(user.id, user);
        repo
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: UserId) -> OxcartResult<Option<UserProfile>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn exists(&self, id: UserId) -> OxcartResult<bool> {
        Ok(self.users.lock().unwrap().contains_key(&id))
    }

    async fn update(&self, profile: &UserProfile) -> OxcartResult<UserProfile> {
        self.users
            .lock()
            .unwrap()
            .insert(profile.id, profile.clone());
        Ok(profile.clone())
    }
}

/// Mock cart repository with a find-by-id call counter so tests can assert
/// cache-first reads never touch the store.
#[derive(Default)]
pub struct MockCartRepository {
    lines: Mutex<HashMap<i64, CartLine>>,
    next_id: AtomicI64,
    pub find_by_id_calls: AtomicUsize,
}

impl MockCartRepository {
    pub fn line(&self, id: CartLineId) -> Option<CartLine> {
        self.lines.lock().unwrap().get(&id.into_inner()).cloned()
    }
}

#[async_trait]
impl CartRepository for MockCartRepository {
    async fn find_by_id(&self, id: CartLineId) -> OxcartResult<Option<CartLine>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lines.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: &ProductId,
    ) -> OxcartResult<Option<CartLine>> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .values()
            .find(|line| line.user_id == user_id && &line.product_id == product_id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> OxcartResult<Vec<CartLine>> {
        let mut lines: Vec<CartLine> = self
            .lines
            .lock()
            .unwrap()
            .values()
            .filter(|line| line.user_id == user_id)
            .cloned()
            .collect();
        lines.sort_by_key(|line| line.id.into_inner());
        Ok(lines)
    }

    async fn count_by_user(&self, user_id: UserId) -> OxcartResult<u64> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .values()
            .filter(|line| line.user_id == user_id)
            .count() as u64)
    }

    async fn insert(&self, line: &NewCartLine) -> OxcartResult<CartLine> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let persisted = CartLine {
            id: CartLineId(id),
            user_id: line.user_id,
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            created_at: line.created_at,
        };
        self.lines.lock().unwrap().insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn update_quantity(&self, id: CartLineId, quantity: i32) -> OxcartResult<()> {
        if let Some(line) = self.lines.lock().unwrap().get_mut(&id.into_inner()) {
            line.quantity = quantity;
        }
        Ok(())
    }

    async fn delete(&self, id: CartLineId) -> OxcartResult<bool> {
        Ok(self.lines.lock().unwrap().remove(&id.into_inner()).is_some())
    }

    async fn delete_by_user(&self, user_id: UserId) -> OxcartResult<u64> {
        let mut lines = self.lines.lock().unwrap();
        let before = lines.len();
        lines.retain(|_, line| line.user_id != user_id);
        Ok((before - lines.len()) as u64)
    }
}

/// Mock order repository.
#[derive(Default)]
pub struct MockOrderRepository {
    orders: Mutex<HashMap<i64, Order>>,
    next_id: AtomicI64,
    next_line_id: AtomicI64,
}

impl MockOrderRepository {
    pub fn order(&self, id: OrderId) -> Option<Order> {
        self.orders.lock().unwrap().get(&id.into_inner()).cloned()
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> OxcartResult<Option<Order>> {
        Ok(self.orders.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_by_number(&self, order_number: &str) -> OxcartResult<Option<Order>> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .values()
            .find(|order| order.order_number == order_number)
            .cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> OxcartResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    async fn insert(&self, order: &Order) -> OxcartResult<Order> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut persisted = order.clone();
        persisted.id = OrderId(id);
        for line in &mut persisted.lines {
            line.id = self.next_line_id.fetch_add(1, Ordering::SeqCst) + 1;
            line.order_id = id;
        }
        self.orders.lock().unwrap().insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, order: &Order) -> OxcartResult<Order> {
        let mut persisted = order.clone();
        for line in &mut persisted.lines {
            if line.id == 0 {
                line.id = self.next_line_id.fetch_add(1, Ordering::SeqCst) + 1;
                line.order_id = order.id.into_inner();
            }
        }
        self.orders
            .lock()
            .unwrap()
            .insert(order.id.into_inner(), persisted.clone());
        Ok(persisted)
    }

    async fn delete(&self, id: OrderId) -> OxcartResult<()> {
        self.orders.lock().unwrap().remove(&id.into_inner());
        Ok(())
    }
}

/// Mock product store.
#[derive(Default)]
pub struct MockProductStore {
    products: Mutex<HashMap<String, CatalogProduct>>,
    next_id: AtomicI64,
}

impl MockProductStore {
    pub fn with_products(products: Vec<CatalogProduct>) -> Self {
        let store = Self::default();
        {
            let mut map = store.products.lock().unwrap();
            for product in products {
                map.insert(product.id.as_str().to_string(), product);
            }
        }
        store
    }

    pub fn product(&self, id: &ProductId) -> Option<CatalogProduct> {
        self.products.lock().unwrap().get(id.as_str()).cloned()
    }
}

#[async_trait]
impl ProductStore for MockProductStore {
    async fn find_by_id(&self, id: &ProductId) -> OxcartResult<Option<CatalogProduct>> {
        Ok(self.products.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> OxcartResult<Option<CatalogProduct>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .values()
            .find(|product| product.sku == sku)
            .cloned())
    }

    async fn list(&self, category: Option<&str>) -> OxcartResult<Vec<CatalogProduct>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .values()
            .filter(|product| category.is_none() || product.category.as_deref() == category)
            .cloned()
            .collect())
    }

    async fn insert(&self, product: NewProduct) -> OxcartResult<CatalogProduct> {
        let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("{:024x}", seq);
        let now = Utc::now();
        let persisted = CatalogProduct {
            id: ProductId::new_unchecked(id.clone()),
            name: product.name,
            description: product.description,
            sku: product.sku,
            price: product.price,
            compare_price: product.compare_price,
            stock_quantity: product.stock_quantity,
            in_stock: product.stock_quantity > 0,
            ribbon: product.ribbon,
            category: product.category,
            media: product.media,
            created_at: now,
            updated_at: now,
        };
        self.products
            .lock()
            .unwrap()
            .insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn replace(&self, product: &CatalogProduct) -> OxcartResult<()> {
        self.products
            .lock()
            .unwrap()
            .insert(product.id.as_str().to_string(), product.clone());
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> OxcartResult<bool> {
        Ok(self.products.lock().unwrap().remove(id.as_str()).is_some())
    }
}

/// Mock review store.
#[derive(Default)]
pub struct MockReviewStore {
    reviews: Mutex<HashMap<String, Review>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ReviewStore for MockReviewStore {
    async fn find_by_id(&self, id: &ReviewId) -> OxcartResult<Option<Review>> {
        Ok(self.reviews.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn find_by_product(&self, product_id: &ProductId) -> OxcartResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|review| &review.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn insert(&self, review: NewReview) -> OxcartResult<Review> {
        let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("{:024x}", 0xbeef_0000_u64 + seq as u64);
        let persisted = Review {
            id: ReviewId::new_unchecked(id.clone()),
            product_id: review.product_id,
            user_id: review.user_id,
            rating: review.rating,
            title: review.title,
            content: review.content,
            image_url: review.image_url,
            created_at: review.created_at,
            updated_at: review.created_at,
        };
        self.reviews
            .lock()
            .unwrap()
            .insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn replace(&self, review: &Review) -> OxcartResult<()> {
        self.reviews
            .lock()
            .unwrap()
            .insert(review.id.as_str().to_string(), review.clone());
        Ok(())
    }

    async fn delete(&self, id: &ReviewId) -> OxcartResult<bool> {
        Ok(self.reviews.lock().unwrap().remove(id.as_str()).is_some())
    }
}
