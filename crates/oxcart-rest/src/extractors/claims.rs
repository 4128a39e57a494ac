//! Authenticated principal extractor.

use crate::auth::Claims;
use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use oxcart_core::{ErrorResponse, OxcartError};

/// Extractor for the authenticated principal.
///
/// The auth middleware validates the bearer token and stashes the claims in
/// request extensions; this extractor surfaces them to handlers and rejects
/// requests that arrived without a valid token.
pub struct AuthenticatedUser(pub Claims);

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Error type for authentication extraction.
pub struct AuthError(OxcartError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);

        let error_response = ErrorResponse::from_error(&self.0);
        let body = Json(ApiResponse::<()>::error(error_response));

        (status, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AuthError(OxcartError::unauthorized("Missing authorization header"))
            })?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AuthError(OxcartError::unauthorized(
                "Invalid authorization format",
            )));
        }

        // Claims are present only if the middleware accepted the token.
        let claims = parts.extensions.get::<Claims>().cloned().ok_or_else(|| {
            AuthError(OxcartError::unauthorized("Invalid or expired token"))
        })?;

        Ok(AuthenticatedUser(claims))
    }
}
