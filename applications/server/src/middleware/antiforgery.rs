/// Anti-forgery middleware
use crate::{
    error::ServerError,
    middleware::CartSession,
    services::{antiforgery::TOKEN_HEADER, AntiforgeryService},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that rejects requests whose `RequestVerificationToken` header
/// was not issued to the caller's cart session.
///
/// Must run inside `session_middleware`.
pub async fn antiforgery_middleware(
    State(antiforgery): State<Arc<AntiforgeryService>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let session = request
        .extensions()
        .get::<CartSession>()
        .cloned()
        .ok_or_else(|| ServerError::Internal("Session middleware not installed".to_string()))?;

    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::Antiforgery(format!("Missing {TOKEN_HEADER} header")))?;

    antiforgery.validate_token(token, session.cart_id())?;

    Ok(next.run(request).await)
}
