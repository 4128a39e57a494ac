//! User profile controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use oxcart_service::{UserInfoResponse, UserInfoUpdateRequest};

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(get_me).put(update_me))
}

/// Fetch the caller's profile.
async fn get_me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UserInfoResponse> {
    let user_id = user.user_id()?;
    let info = state.user_info_service.get_user_info(user_id).await?;
    ok(info)
}

/// Update the caller's profile.
async fn update_me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UserInfoUpdateRequest>,
) -> ApiResult<UserInfoResponse> {
    let user_id = user.user_id()?;
    let info = state
        .user_info_service
        .update_user_info(user_id, request)
        .await?;
    ok(info)
}
