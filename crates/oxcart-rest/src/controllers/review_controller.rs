//! Review controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use oxcart_service::{ReviewCreateRequest, ReviewResponse, ReviewUpdateRequest};
use tracing::debug;

/// Creates the review router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route(
            "/:id",
            get(get_review).put(update_review).delete(delete_review),
        )
        .route("/product/:product_id", get(get_product_reviews))
}

/// Create a review.
async fn create_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ReviewCreateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponse>>), AppError> {
    debug!("Create review request for product {}", request.product_id);

    let user_id = user.user_id()?;
    let review = state.review_service.create_review(user_id, request).await?;
    Ok(created(review))
}

/// Fetch one review.
async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ReviewResponse> {
    let review = state.review_service.get_review(&id).await?;
    ok(review)
}

/// List a product's reviews.
async fn get_product_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ApiResult<Vec<ReviewResponse>> {
    let reviews = state.review_service.get_product_reviews(&product_id).await?;
    ok(reviews)
}

/// Update the caller's review.
async fn update_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<ReviewUpdateRequest>,
) -> ApiResult<ReviewResponse> {
    let user_id = user.user_id()?;
    let review = state
        .review_service
        .update_review(user_id, &id, request)
        .await?;
    ok(review)
}

/// Delete the caller's review.
async fn delete_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user_id = user.user_id()?;
    state.review_service.delete_review(user_id, &id).await?;
    Ok(no_content())
}
