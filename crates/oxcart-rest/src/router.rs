//! Main application router.

use crate::{
    auth::TokenValidator,
    controllers::{
        cart_controller, health_controller, order_controller, payment_controller,
        product_controller, review_controller, user_controller,
    },
    middleware::{auth_middleware, AuthMiddlewareState},
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use oxcart_config::ServerConfig;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Creates the main application router.
pub fn create_router(
    state: AppState,
    validator: Arc<TokenValidator>,
    server_config: &ServerConfig,
) -> Router {
    let cors = if server_config.cors_enabled {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    let auth_state = AuthMiddlewareState::new(validator);

    let api_router = Router::new()
        .nest("/cart", cart_controller::router())
        .nest("/orders", order_controller::router())
        .nest("/products", product_controller::router())
        .nest("/reviews", review_controller::router())
        .nest("/users", user_controller::router())
        .nest("/payments", payment_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state);

    let router = Router::new()
        // Health endpoints (no auth required)
        .merge(health_controller::router())
        // API v1
        .nest("/api/v1", api_router)
        // Root endpoint
        .route("/", get(root))
        // Middleware layers
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("Router created with REST endpoints under /api/v1");
    router
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Oxcart API v1"
}
