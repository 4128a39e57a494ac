//! Inbound token validation.
//!
//! Token issuance lives upstream; this layer only validates bearer tokens
//! and exposes the authenticated principal (user id + role) to handlers.
//! Ownership checks downstream re-validate the user against the store.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use oxcart_config::SecurityConfig;
use oxcart_core::{OxcartError, OxcartResult, UserId, UserRole};
use serde::{Deserialize, Serialize};

/// JWT claims carried by inbound bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    /// Role name.
    pub role: String,
    /// Expiry (seconds since epoch).
    pub exp: usize,
    /// Issuer.
    pub iss: String,
}

impl Claims {
    /// Parses the subject into a typed user id.
    pub fn user_id(&self) -> OxcartResult<UserId> {
        UserId::parse(&self.sub)
            .map_err(|_| OxcartError::unauthorized("Invalid user ID in token"))
    }

    /// The principal's role.
    #[must_use]
    pub fn user_role(&self) -> UserRole {
        UserRole::parse(&self.role)
    }

    /// Requires the given role or better.
    pub fn require_role(&self, required: UserRole) -> OxcartResult<()> {
        if self.user_role().has_permission(required) {
            Ok(())
        } else {
            Err(OxcartError::forbidden("Insufficient role"))
        }
    }
}

/// Validates inbound bearer tokens against the configured secret.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Creates a validator from the security configuration.
    #[must_use]
    pub fn new(config: &SecurityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.jwt_issuer.clone()]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validates a token and returns its claims.
    pub fn validate(&self, token: &str) -> OxcartResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| OxcartError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(data.claims)
    }
}
