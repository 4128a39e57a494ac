//! Payment intent controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use oxcart_service::{PaymentIntentRequest, PaymentIntentResponse};
use tracing::debug;

/// Creates the payment router.
pub fn router() -> Router<AppState> {
    Router::new().route("/intent", post(create_intent))
}

/// Create a payment intent for the requested items.
async fn create_intent(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<PaymentIntentRequest>,
) -> ApiResult<PaymentIntentResponse> {
    debug!("Create payment intent request");

    // Resolving the principal also rejects anonymous callers.
    let _user_id = user.user_id()?;

    let intent = state.payment_service.create_payment_intent(request).await?;
    ok(intent)
}
