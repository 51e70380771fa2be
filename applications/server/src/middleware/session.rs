/// Anonymous cart session middleware
use crate::error::ServerError;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use musicstore_core::CartId;
use uuid::Uuid;

/// Cookie holding the cart id
pub const SESSION_COOKIE: &str = "MusicStore.Session";

/// Cart session attached to every request
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct CartSession {
    cart_id: CartId,
    is_new: bool,
}

impl CartSession {
    pub fn cart_id(&self) -> &CartId {
        &self.cart_id
    }
}

fn session_from_cookies(headers: &HeaderMap) -> Option<CartId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(|uuid| CartId::new(uuid.to_string()))
}

/// Middleware that reads the session cookie, issuing a new cart id when it
/// is missing or malformed
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let session = match session_from_cookies(request.headers()) {
        Some(cart_id) => CartSession {
            cart_id,
            is_new: false,
        },
        None => {
            let cart_id = CartId::generate();
            tracing::debug!("Issuing new cart session {}", cart_id);
            CartSession {
                cart_id,
                is_new: true,
            }
        }
    };

    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    if session.is_new {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session.cart_id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to build session cookie: {}", e),
        }
    }

    response
}

/// Implement FromRequestParts so CartSession can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CartSession>()
            .cloned()
            .ok_or_else(|| ServerError::Internal("Session middleware not installed".to_string()))
    }
}
