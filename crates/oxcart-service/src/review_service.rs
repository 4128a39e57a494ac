//! Product review service.

use crate::cache::ReviewListCache;
use crate::dto::{ReviewCreateRequest, ReviewResponse, ReviewUpdateRequest};
use async_trait::async_trait;
use chrono::Utc;
use oxcart_core::{OxcartError, OxcartResult, ProductId, ReviewId, UserId, ValidateExt};
use oxcart_repository::{NewReview, ProductStore, ReviewStore, UserRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Review service.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Creates a review for a product.
    async fn create_review(
        &self,
        user_id: UserId,
        request: ReviewCreateRequest,
    ) -> OxcartResult<ReviewResponse>;

    /// Fetches one review.
    async fn get_review(&self, review_id: &str) -> OxcartResult<ReviewResponse>;

    /// Lists a product's reviews, cache-first.
    async fn get_product_reviews(&self, product_id: &str) -> OxcartResult<Vec<ReviewResponse>>;

    /// Updates the caller's review.
    async fn update_review(
        &self,
        user_id: UserId,
        review_id: &str,
        request: ReviewUpdateRequest,
    ) -> OxcartResult<ReviewResponse>;

    /// Deletes the caller's review.
    async fn delete_review(&self, user_id: UserId, review_id: &str) -> OxcartResult<()>;
}

/// Review service over the catalog stores and the review-list cache.
pub struct ReviewServiceImpl<R, U, P> {
    reviews: Arc<R>,
    users: Arc<U>,
    products: Arc<P>,
    cache: ReviewListCache,
}

impl<R, U, P> ReviewServiceImpl<R, U, P>
where
    R: ReviewStore,
    U: UserRepository,
    P: ProductStore,
{
    /// Creates a new review service.
    pub fn new(reviews: Arc<R>, users: Arc<U>, products: Arc<P>, cache: ReviewListCache) -> Self {
        Self {
            reviews,
            users,
            products,
            cache,
        }
    }

    async fn load_owned_review(
        &self,
        user_id: UserId,
        review_id: &str,
    ) -> OxcartResult<oxcart_core::Review> {
        let review_id = ReviewId::parse(review_id)?;

        let review = self
            .reviews
            .find_by_id(&review_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("Review", &review_id))?;

        if !review.is_owned_by(user_id) {
            return Err(OxcartError::forbidden(
                "You are not authorized to modify this review",
            ));
        }

        Ok(review)
    }
}

#[async_trait]
impl<R, U, P> ReviewService for ReviewServiceImpl<R, U, P>
where
    R: ReviewStore + 'static,
    U: UserRepository + 'static,
    P: ProductStore + 'static,
{
    async fn create_review(
        &self,
        user_id: UserId,
        request: ReviewCreateRequest,
    ) -> OxcartResult<ReviewResponse> {
        debug!("Creating review for user {}", user_id);

        request.validate_request()?;

        if !self.users.exists(user_id).await? {
            return Err(OxcartError::not_found("User", user_id));
        }

        let product_id = ProductId::parse(&request.product_id)?;
        self.products
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("Product", &product_id))?;

        let review = self
            .reviews
            .insert(NewReview {
                product_id: product_id.clone(),
                user_id,
                rating: request.rating,
                title: request.title,
                content: request.content,
                image_url: request.image_url,
                created_at: Utc::now(),
            })
            .await?;

        // The cached list no longer matches the store; the next read
        // rebuilds it.
        self.cache.invalidate(&product_id).await;

        info!("Review {} created for product {}", review.id, product_id);
        Ok(ReviewResponse::from(review))
    }

    async fn get_review(&self, review_id: &str) -> OxcartResult<ReviewResponse> {
        let review_id = ReviewId::parse(review_id)?;

        let review = self
            .reviews
            .find_by_id(&review_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("Review", &review_id))?;

        Ok(ReviewResponse::from(review))
    }

    async fn get_product_reviews(&self, product_id: &str) -> OxcartResult<Vec<ReviewResponse>> {
        let product_id = ProductId::parse(product_id)?;

        // Read-through for the per-product list only.
        if let Some(cached) = self.cache.product_reviews(&product_id).await {
            debug!("Cache hit for reviews of product {}", product_id);
            return Ok(cached);
        }

        let reviews = self.reviews.find_by_product(&product_id).await?;
        let responses: Vec<ReviewResponse> =
            reviews.into_iter().map(ReviewResponse::from).collect();

        // Population skips empty lists (enforced by the cache wrapper).
        self.cache.set_product_reviews(&product_id, &responses).await;

        Ok(responses)
    }

    async fn update_review(
        &self,
        user_id: UserId,
        review_id: &str,
        request: ReviewUpdateRequest,
    ) -> OxcartResult<ReviewResponse> {
        debug!("Updating review {} for user {}", review_id, user_id);

        request.validate_request()?;

        let mut review = self.load_owned_review(user_id, review_id).await?;

        if let Some(rating) = request.rating {
            review.rating = rating;
        }
        if let Some(title) = request.title {
            review.title = Some(title);
        }
        if let Some(content) = request.content {
            review.content = content;
        }
        review.updated_at = Utc::now();

        self.reviews.replace(&review).await?;
        self.cache.invalidate(&review.product_id).await;

        info!("Review {} updated", review.id);
        Ok(ReviewResponse::from(review))
    }

    async fn delete_review(&self, user_id: UserId, review_id: &str) -> OxcartResult<()> {
        debug!("Deleting review {} for user {}", review_id, user_id);

        let review = self.load_owned_review(user_id, review_id).await?;

        self.reviews.delete(&review.id).await?;
        self.cache.invalidate(&review.product_id).await;

        info!("Review {} deleted", review.id);
        Ok(())
    }
}
