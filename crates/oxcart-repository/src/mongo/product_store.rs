//! MongoDB product store implementation.

use super::CatalogStore;
use crate::traits::{NewProduct, ProductStore};
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use futures::TryStreamExt;
use mongodb::Collection;
use oxcart_core::{CatalogProduct, OxcartError, OxcartResult, ProductId, ProductMedia};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

const COLLECTION: &str = "products";

/// MongoDB product store.
#[derive(Debug, Clone)]
pub struct MongoProductStore {
    store: CatalogStore,
}

impl MongoProductStore {
    /// Creates a product store over the catalog database.
    #[must_use]
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    fn collection(&self) -> Collection<ProductDocument> {
        self.store.collection(COLLECTION)
    }
}

/// BSON document shape for a product. Prices are stored as strings to keep
/// exact decimal values across the driver boundary.
#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    description: String,
    sku: String,
    price: String,
    compare_price: Option<String>,
    stock_quantity: i32,
    in_stock: bool,
    ribbon: Option<String>,
    category: Option<String>,
    media: Vec<MediaDocument>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

#[derive(Debug, Serialize, Deserialize)]
struct MediaDocument {
    url: String,
    media_type: String,
    sort_order: i32,
}

impl From<&ProductMedia> for MediaDocument {
    fn from(media: &ProductMedia) -> Self {
        Self {
            url: media.url.clone(),
            media_type: media.media_type.clone(),
            sort_order: media.sort_order,
        }
    }
}

impl From<MediaDocument> for ProductMedia {
    fn from(doc: MediaDocument) -> Self {
        Self {
            url: doc.url,
            media_type: doc.media_type,
            sort_order: doc.sort_order,
        }
    }
}

fn parse_price(value: &str) -> OxcartResult<Decimal> {
    value
        .parse::<Decimal>()
        .map_err(|e| OxcartError::DocumentStore(format!("Invalid price in document: {}", e)))
}

impl TryFrom<ProductDocument> for CatalogProduct {
    type Error = OxcartError;

    fn try_from(doc: ProductDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| OxcartError::DocumentStore("Product document missing _id".to_string()))?;

        let compare_price = doc.compare_price.as_deref().map(parse_price).transpose()?;

        Ok(CatalogProduct {
            id: ProductId::new_unchecked(id.to_hex()),
            name: doc.name,
            description: doc.description,
            sku: doc.sku,
            price: parse_price(&doc.price)?,
            compare_price,
            stock_quantity: doc.stock_quantity,
            in_stock: doc.in_stock,
            ribbon: doc.ribbon,
            category: doc.category,
            media: doc.media.into_iter().map(ProductMedia::from).collect(),
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        })
    }
}

impl TryFrom<&CatalogProduct> for ProductDocument {
    type Error = OxcartError;

    fn try_from(product: &CatalogProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(object_id(&product.id)?),
            name: product.name.clone(),
            description: product.description.clone(),
            sku: product.sku.clone(),
            price: product.price.to_string(),
            compare_price: product.compare_price.map(|p| p.to_string()),
            stock_quantity: product.stock_quantity,
            in_stock: product.in_stock,
            ribbon: product.ribbon.clone(),
            category: product.category.clone(),
            media: product.media.iter().map(MediaDocument::from).collect(),
            created_at: bson::DateTime::from_chrono(product.created_at),
            updated_at: bson::DateTime::from_chrono(product.updated_at),
        })
    }
}

fn object_id(id: &ProductId) -> OxcartResult<ObjectId> {
    ObjectId::parse_str(id.as_str())
        .map_err(|e| OxcartError::DocumentStore(format!("Invalid product object id: {}", e)))
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn find_by_id(&self, id: &ProductId) -> OxcartResult<Option<CatalogProduct>> {
        debug!("Finding product by id: {}", id);

        let doc = self
            .collection()
            .find_one(doc! { "_id": object_id(id)? }, None)
            .await?;

        doc.map(CatalogProduct::try_from).transpose()
    }

    async fn find_by_sku(&self, sku: &str) -> OxcartResult<Option<CatalogProduct>> {
        let doc = self
            .collection()
            .find_one(doc! { "sku": sku }, None)
            .await?;

        doc.map(CatalogProduct::try_from).transpose()
    }

    async fn list(&self, category: Option<&str>) -> OxcartResult<Vec<CatalogProduct>> {
        let filter = match category {
            Some(category) => doc! { "category": category },
            None => doc! {},
        };

        let docs: Vec<ProductDocument> = self
            .collection()
            .find(filter, None)
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(CatalogProduct::try_from).collect()
    }

    async fn insert(&self, product: NewProduct) -> OxcartResult<CatalogProduct> {
        debug!("Inserting product: {}", product.sku);

        let now = bson::DateTime::now();
        let doc = ProductDocument {
            id: Some(ObjectId::new()),
            name: product.name,
            description: product.description,
            sku: product.sku,
            price: product.price.to_string(),
            compare_price: product.compare_price.map(|p| p.to_string()),
            stock_quantity: product.stock_quantity,
            in_stock: product.stock_quantity > 0,
            ribbon: product.ribbon,
            category: product.category,
            media: product.media.iter().map(MediaDocument::from).collect(),
            created_at: now,
            updated_at: now,
        };

        self.collection().insert_one(&doc, None).await?;

        CatalogProduct::try_from(doc)
    }

    async fn replace(&self, product: &CatalogProduct) -> OxcartResult<()> {
        debug!("Replacing product: {}", product.id);

        let doc = ProductDocument::try_from(product)?;
        self.collection()
            .replace_one(doc! { "_id": object_id(&product.id)? }, &doc, None)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> OxcartResult<bool> {
        debug!("Deleting product: {}", id);

        let result = self
            .collection()
            .delete_one(doc! { "_id": object_id(id)? }, None)
            .await?;

        Ok(result.deleted_count > 0)
    }
}
