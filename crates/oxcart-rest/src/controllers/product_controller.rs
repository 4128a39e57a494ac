//! Catalog product controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use oxcart_core::UserRole;
use oxcart_service::{ProductCreateRequest, ProductResponse, ProductUpdateRequest};
use serde::Deserialize;
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    category: Option<String>,
}

/// List products, optionally by category.
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<ProductResponse>> {
    let products = state
        .product_service
        .list_products(query.category.as_deref())
        .await?;
    ok(products)
}

/// Fetch one product.
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductResponse> {
    let product = state.product_service.get_product(&id).await?;
    ok(product)
}

/// Create a product (admin only).
async fn create_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ProductCreateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), AppError> {
    debug!("Create product request: {}", request.sku);

    user.require_role(UserRole::Admin)?;

    let product = state.product_service.create_product(request).await?;
    Ok(created(product))
}

/// Update a product (admin only).
async fn update_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<ProductUpdateRequest>,
) -> ApiResult<ProductResponse> {
    user.require_role(UserRole::Admin)?;

    let product = state.product_service.update_product(&id, request).await?;
    ok(product)
}

/// Delete a product (admin only).
async fn delete_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    user.require_role(UserRole::Admin)?;

    state.product_service.delete_product(&id).await?;
    Ok(no_content())
}
