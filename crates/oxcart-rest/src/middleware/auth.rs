//! Authentication middleware.

use crate::auth::TokenValidator;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub validator: Arc<TokenValidator>,
}

impl AuthMiddlewareState {
    /// Creates middleware state over a token validator.
    #[must_use]
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }
}

/// Validates the bearer token (if any) and stashes the claims in request
/// extensions. Requests without valid claims pass through; handlers that
/// require a principal reject them via the extractor.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            match state.validator.validate(token) {
                Ok(claims) => {
                    debug!("Authenticated user: {}", claims.sub);
                    request.extensions_mut().insert(claims);
                }
                Err(e) => {
                    debug!("Token validation failed: {}", e);
                }
            }
        }
    }

    Ok(next.run(request).await)
}
