//! Product review entity.

use crate::{ProductId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product review, owned by the document store alongside the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Document identifier.
    pub id: ReviewId,

    /// Reviewed product.
    pub product_id: ProductId,

    /// Authoring user.
    pub user_id: UserId,

    /// Star rating, 1 to 5.
    pub rating: i32,

    /// Optional headline.
    pub title: Option<String>,

    /// Review body.
    pub content: String,

    /// Optional uploaded image URL.
    pub image_url: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Checks ownership against the calling user.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
