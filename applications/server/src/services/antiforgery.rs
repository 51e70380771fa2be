/// Anti-forgery service - request verification tokens bound to a cart session
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use musicstore_core::CartId;
use serde::{Deserialize, Serialize};

/// Header carrying the token on protected requests
pub const TOKEN_HEADER: &str = "RequestVerificationToken";

#[derive(Debug, Clone)]
pub struct AntiforgeryService {
    secret: String,
    token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (cart session)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub purpose: TokenPurpose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Antiforgery,
}

impl AntiforgeryService {
    pub fn new(secret: String, expiration_hours: u64) -> Self {
        Self {
            secret,
            token_expiration: Duration::hours(expiration_hours as i64),
        }
    }

    /// Issue a token for the given cart session
    pub fn issue_token(&self, cart_id: &CartId) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: cart_id.as_str().to_string(),
            exp: (now + self.token_expiration).timestamp(),
            iat: now.timestamp(),
            purpose: TokenPurpose::Antiforgery,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ServerError::Internal(format!("Failed to issue anti-forgery token: {e}")))
    }

    /// Check that `token` is valid, unexpired, and was issued to `cart_id`
    pub fn validate_token(&self, token: &str, cart_id: &CartId) -> Result<()> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| ServerError::Antiforgery(e.to_string()))?;

        if token_data.claims.sub != cart_id.as_str() {
            return Err(ServerError::Antiforgery(
                "Token was issued to a different session".to_string(),
            ));
        }

        Ok(())
    }
}
