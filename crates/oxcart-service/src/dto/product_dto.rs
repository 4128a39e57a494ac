//! Catalog product DTOs.

use chrono::{DateTime, Utc};
use oxcart_core::{CatalogProduct, ProductId, ProductMedia};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Media record in requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductMediaDto {
    #[validate(url(message = "Invalid media URL"))]
    pub url: String,
    pub media_type: String,
    pub sort_order: i32,
}

impl From<ProductMediaDto> for ProductMedia {
    fn from(dto: ProductMediaDto) -> Self {
        Self {
            url: dto.url,
            media_type: dto.media_type,
            sort_order: dto.sort_order,
        }
    }
}

impl From<ProductMedia> for ProductMediaDto {
    fn from(media: ProductMedia) -> Self {
        Self {
            url: media.url,
            media_type: media.media_type,
            sort_order: media.sort_order,
        }
    }
}

/// Request to create a catalog product (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreateRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub description: String,

    #[validate(length(min = 1, max = 64, message = "SKU must be 1-64 characters"))]
    pub sku: String,

    pub price: Decimal,
    pub compare_price: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: i32,

    pub ribbon: Option<String>,
    pub category: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub media: Vec<ProductMediaDto>,
}

/// Partial product update (admin). Absent fields leave existing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductUpdateRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub compare_price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub ribbon: Option<String>,
    pub category: Option<String>,

    #[validate(nested)]
    pub media: Option<Vec<ProductMediaDto>>,
}

/// Product response DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: Decimal,
    pub compare_price: Option<Decimal>,
    pub stock_quantity: i32,
    pub in_stock: bool,
    pub ribbon: Option<String>,
    pub category: Option<String>,
    pub media: Vec<ProductMediaDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CatalogProduct> for ProductResponse {
    fn from(product: CatalogProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            sku: product.sku,
            price: product.price,
            compare_price: product.compare_price,
            stock_quantity: product.stock_quantity,
            in_stock: product.in_stock,
            ribbon: product.ribbon,
            category: product.category,
            media: product.media.into_iter().map(ProductMediaDto::from).collect(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
