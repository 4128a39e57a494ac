//! Order controller.

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
use oxcart_core::OrderId;
use oxcart_service::{OrderCreateRequest, OrderResponse, OrderUpdateRequest};
use tracing::debug;

/// Creates the order router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_user_orders).post(create_order))
        .route(
            "/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/:id/complete", post(complete_order))
        .route("/number/:order_number", get(get_order_by_number))
}

/// Checkout.
async fn create_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<OrderCreateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), AppError> {
    debug!("Create order request");

    let user_id = user.user_id()?;
    let order = state.order_service.create_order(user_id, request).await?;
    Ok(created(order))
}

/// List the caller's orders.
async fn get_user_orders(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<OrderResponse>> {
    let user_id = user.user_id()?;
    let orders = state.order_service.get_user_orders(user_id).await?;
    ok(orders)
}

/// Fetch one order by ID.
async fn get_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<OrderResponse> {
    let user_id = user.user_id()?;
    let order = state.order_service.get_order(user_id, OrderId(id)).await?;
    ok(order)
}

/// Fetch one order by order number.
async fn get_order_by_number(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_number): Path<String>,
) -> ApiResult<OrderResponse> {
    let user_id = user.user_id()?;
    let order = state
        .order_service
        .get_order_by_number(user_id, &order_number)
        .await?;
    ok(order)
}

/// Apply a partial update to a pending order.
async fn update_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<OrderUpdateRequest>,
) -> ApiResult<OrderResponse> {
    let user_id = user.user_id()?;
    let order = state
        .order_service
        .update_order(user_id, OrderId(id), request)
        .await?;
    ok(order)
}

/// Delete a pending order.
async fn delete_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user_id = user.user_id()?;
    state
        .order_service
        .delete_order(user_id, OrderId(id))
        .await?;
    Ok(no_content())
}

/// Mark an order paid and completed.
async fn complete_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<OrderResponse> {
    let user_id = user.user_id()?;
    let order = state
        .order_service
        .complete_order(user_id, OrderId(id))
        .await?;
    ok(order)
}
