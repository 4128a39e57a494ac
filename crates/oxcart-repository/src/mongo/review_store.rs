//! MongoDB review store implementation.

use super::CatalogStore;
use crate::traits::{NewReview, ReviewStore};
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Collection;
use oxcart_core::{OxcartError, OxcartResult, ProductId, Review, ReviewId, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

const COLLECTION: &str = "reviews";

/// MongoDB review store.
#[derive(Debug, Clone)]
pub struct MongoReviewStore {
    store: CatalogStore,
}

impl MongoReviewStore {
    /// Creates a review store over the catalog database.
    #[must_use]
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    fn collection(&self) -> Collection<ReviewDocument> {
        self.store.collection(COLLECTION)
    }
}

/// BSON document shape for a review.
#[derive(Debug, Serialize, Deserialize)]
struct ReviewDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    product_id: ObjectId,
    user_id: String,
    rating: i32,
    title: Option<String>,
    content: String,
    image_url: Option<String>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl TryFrom<ReviewDocument> for Review {
    type Error = OxcartError;

    fn try_from(doc: ReviewDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| OxcartError::DocumentStore("Review document missing _id".to_string()))?;

        let user_id = Uuid::parse_str(&doc.user_id)
            .map_err(|e| OxcartError::DocumentStore(format!("Invalid user id in review: {}", e)))?;

        Ok(Review {
            id: ReviewId::new_unchecked(id.to_hex()),
            product_id: ProductId::new_unchecked(doc.product_id.to_hex()),
            user_id: UserId::from_uuid(user_id),
            rating: doc.rating,
            title: doc.title,
            content: doc.content,
            image_url: doc.image_url,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        })
    }
}

fn review_object_id(id: &ReviewId) -> OxcartResult<ObjectId> {
    ObjectId::parse_str(id.as_str())
        .map_err(|e| OxcartError::DocumentStore(format!("Invalid review object id: {}", e)))
}

fn product_object_id(id: &ProductId) -> OxcartResult<ObjectId> {
    ObjectId::parse_str(id.as_str())
        .map_err(|e| OxcartError::DocumentStore(format!("Invalid product object id: {}", e)))
}

#[async_trait]
impl ReviewStore for MongoReviewStore {
    async fn find_by_id(&self, id: &ReviewId) -> OxcartResult<Option<Review>> {
        debug!("Finding review by id: {}", id);

        let doc = self
            .collection()
            .find_one(doc! { "_id": review_object_id(id)? }, None)
            .await?;

        doc.map(Review::try_from).transpose()
    }

    async fn find_by_product(&self, product_id: &ProductId) -> OxcartResult<Vec<Review>> {
        debug!("Finding reviews for product: {}", product_id);

        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let docs: Vec<ReviewDocument> = self
            .collection()
            .find(doc! { "product_id": product_object_id(product_id)? }, options)
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(Review::try_from).collect()
    }

    async fn insert(&self, review: NewReview) -> OxcartResult<Review> {
        debug!("Inserting review for product: {}", review.product_id);

        let now = bson::DateTime::from_chrono(review.created_at);
        let doc = ReviewDocument {
            id: Some(ObjectId::new()),
            product_id: product_object_id(&review.product_id)?,
            user_id: review.user_id.to_string(),
            rating: review.rating,
            title: review.title,
            content: review.content,
            image_url: review.image_url,
            created_at: now,
            updated_at: now,
        };

        self.collection().insert_one(&doc, None).await?;

        Review::try_from(doc)
    }

    async fn replace(&self, review: &Review) -> OxcartResult<()> {
        debug!("Replacing review: {}", review.id);

        let doc = ReviewDocument {
            id: Some(review_object_id(&review.id)?),
            product_id: product_object_id(&review.product_id)?,
            user_id: review.user_id.to_string(),
            rating: review.rating,
            title: review.title.clone(),
            content: review.content.clone(),
            image_url: review.image_url.clone(),
            created_at: bson::DateTime::from_chrono(review.created_at),
            updated_at: bson::DateTime::from_chrono(review.updated_at),
        };

        self.collection()
            .replace_one(doc! { "_id": review_object_id(&review.id)? }, &doc, None)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: &ReviewId) -> OxcartResult<bool> {
        debug!("Deleting review: {}", id);

        let result = self
            .collection()
            .delete_one(doc! { "_id": review_object_id(id)? }, None)
            .await?;

        Ok(result.deleted_count > 0)
    }
}
