//! Shopping cart controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use oxcart_core::CartLineId;
use oxcart_service::{CartItemRequest, CartItemResponse, CartItemUpdateRequest};
use tracing::debug;

/// Creates the cart router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_item).delete(delete_all))
        .route(
            "/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// List the caller's cart.
async fn get_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<CartItemResponse>> {
    let user_id = user.user_id()?;
    let cart = state.cart_service.get_cart(user_id).await?;
    ok(cart)
}

/// Add a quantity delta for a product.
async fn add_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CartItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CartItemResponse>>), AppError> {
    debug!("Add cart item request: {:?}", request);

    let user_id = user.user_id()?;
    let item = state.cart_service.add_item(user_id, request).await?;
    Ok(created(item))
}

/// Read one cart line.
async fn get_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<CartItemResponse> {
    let user_id = user.user_id()?;
    let item = state
        .cart_service
        .get_item(user_id, CartLineId(id))
        .await?;
    ok(item)
}

/// Overwrite a cart line's quantity.
async fn update_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<CartItemUpdateRequest>,
) -> ApiResult<CartItemResponse> {
    let user_id = user.user_id()?;
    let item = state
        .cart_service
        .update_item(user_id, CartLineId(id), request)
        .await?;
    ok(item)
}

/// Delete one cart line.
async fn delete_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user_id = user.user_id()?;
    state
        .cart_service
        .delete_item(user_id, CartLineId(id))
        .await?;
    Ok(no_content())
}

/// Empty the caller's cart.
async fn delete_all(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<StatusCode, AppError> {
    let user_id = user.user_id()?;
    state.cart_service.delete_all(user_id).await?;
    Ok(no_content())
}
