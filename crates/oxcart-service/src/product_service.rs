//! Catalog product service.

use crate::cache::{ProductCache, ReviewListCache};
use crate::dto::{ProductCreateRequest, ProductResponse, ProductUpdateRequest};
use async_trait::async_trait;
use chrono::Utc;
use oxcart_core::{OxcartError, OxcartResult, ProductId, ProductMedia, ValidateExt};
use oxcart_repository::{NewProduct, ProductStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Catalog product service.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Fetches a product, cache-first.
    async fn get_product(&self, product_id: &str) -> OxcartResult<ProductResponse>;

    /// Lists products, optionally by category. Not cached.
    async fn list_products(&self, category: Option<&str>) -> OxcartResult<Vec<ProductResponse>>;

    /// Creates a product (admin).
    async fn create_product(&self, request: ProductCreateRequest) -> OxcartResult<ProductResponse>;

    /// Applies a partial update to a product (admin).
    async fn update_product(
        &self,
        product_id: &str,
        request: ProductUpdateRequest,
    ) -> OxcartResult<ProductResponse>;

    /// Deletes a product (admin).
    async fn delete_product(&self, product_id: &str) -> OxcartResult<()>;
}

/// Product service over the catalog store and the product cache.
pub struct ProductServiceImpl<P> {
    products: Arc<P>,
    cache: ProductCache,
    review_cache: ReviewListCache,
}

impl<P: ProductStore> ProductServiceImpl<P> {
    /// Creates a new product service.
    pub fn new(products: Arc<P>, cache: ProductCache, review_cache: ReviewListCache) -> Self {
        Self {
            products,
            cache,
            review_cache,
        }
    }
}

#[async_trait]
impl<P: ProductStore + 'static> ProductService for ProductServiceImpl<P> {
    async fn get_product(&self, product_id: &str) -> OxcartResult<ProductResponse> {
        let product_id = ProductId::parse(product_id)?;

        // Read-through: miss loads from the store and populates.
        if let Some(cached) = self.cache.product(&product_id).await {
            debug!("Cache hit for product: {}", product_id);
            return Ok(cached);
        }

        let product = self
            .products
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("Product", &product_id))?;

        let response = ProductResponse::from(product);
        self.cache.set_product(&response).await;

        Ok(response)
    }

    async fn list_products(&self, category: Option<&str>) -> OxcartResult<Vec<ProductResponse>> {
        let products = self.products.list(category).await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    async fn create_product(&self, request: ProductCreateRequest) -> OxcartResult<ProductResponse> {
        debug!("Creating product: {}", request.sku);

        request.validate_request()?;

        if self.products.find_by_sku(&request.sku).await?.is_some() {
            return Err(OxcartError::conflict(format!(
                "Product with SKU '{}' already exists",
                request.sku
            )));
        }

        let product = self
            .products
            .insert(NewProduct {
                name: request.name,
                description: request.description,
                sku: request.sku,
                price: request.price,
                compare_price: request.compare_price,
                stock_quantity: request.stock_quantity,
                ribbon: request.ribbon,
                category: request.category,
                media: request.media.into_iter().map(ProductMedia::from).collect(),
            })
            .await?;

        info!("Product created: {} ({})", product.id, product.sku);

        // Write-through.
        let response = ProductResponse::from(product);
        self.cache.set_product(&response).await;

        Ok(response)
    }

    async fn update_product(
        &self,
        product_id: &str,
        request: ProductUpdateRequest,
    ) -> OxcartResult<ProductResponse> {
        debug!("Updating product: {}", product_id);

        request.validate_request()?;

        let product_id = ProductId::parse(product_id)?;
        let mut product = self
            .products
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("Product", &product_id))?;

        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(description) = request.description {
            product.description = description;
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(compare_price) = request.compare_price {
            product.compare_price = Some(compare_price);
        }
        if let Some(stock_quantity) = request.stock_quantity {
            product.stock_quantity = stock_quantity;
            product.in_stock = stock_quantity > 0;
        }
        if let Some(ribbon) = request.ribbon {
            product.ribbon = Some(ribbon);
        }
        if let Some(category) = request.category {
            product.category = Some(category);
        }
        if let Some(media) = request.media {
            product.media = media.into_iter().map(ProductMedia::from).collect();
        }
        product.updated_at = Utc::now();

        self.products.replace(&product).await?;

        // Write-through.
        let response = ProductResponse::from(product);
        self.cache.set_product(&response).await;

        info!("Product updated: {}", product_id);
        Ok(response)
    }

    async fn delete_product(&self, product_id: &str) -> OxcartResult<()> {
        debug!("Deleting product: {}", product_id);

        let product_id = ProductId::parse(product_id)?;

        if !self.products.delete(&product_id).await? {
            return Err(OxcartError::not_found("Product", &product_id));
        }

        // Explicit invalidation, including the product's review list.
        self.cache.remove_product(&product_id).await;
        self.review_cache.invalidate(&product_id).await;

        info!("Product deleted: {}", product_id);
        Ok(())
    }
}
