//! Review DTOs.

use chrono::{DateTime, Utc};
use oxcart_core::{ProductId, Review, ReviewId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a review.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewCreateRequest {
    #[validate(length(equal = 24, message = "Invalid product ID format"))]
    pub product_id: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 128, message = "Title cannot exceed 128 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,

    pub image_url: Option<String>,
}

/// Partial review update. Absent fields leave existing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReviewUpdateRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    #[validate(length(max = 128, message = "Title cannot exceed 128 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: Option<String>,
}

/// Review response DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            product_id: review.product_id,
            user_id: review.user_id,
            rating: review.rating,
            title: review.title,
            content: review.content,
            image_url: review.image_url,
            created_at: review.created_at,
        }
    }
}
