//! Authentication middleware
//!
//! Validates the `Authorization: Bearer <token>` header and injects
//! [`CurrentUser`] into request extensions for downstream handlers.

use axum::http::{Method, header};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;

/// Paths that never require a token:
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/` (health check, 404s)
/// - `/api/auth/register` and `/api/auth/login`
/// - `GET /api/products...` (public catalog browsing)
fn is_public(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS {
        return true;
    }
    if !path.starts_with("/api/") {
        return true;
    }
    if path == "/api/auth/register" || path == "/api/auth/login" {
        return true;
    }
    method == Method::GET && (path == "/api/products" || path.starts_with("/api/products/"))
}

pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(value) => JwtService::extract_from_header(value).ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(uri = %req.uri(), "Request without Authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "Token validation failed");
            match e {
                JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_reads_are_public_but_writes_are_not() {
        assert!(is_public(&Method::GET, "/api/products"));
        assert!(is_public(&Method::GET, "/api/products/blue-shirt"));
        assert!(!is_public(&Method::POST, "/api/products"));
        assert!(!is_public(&Method::PATCH, "/api/products/blue-shirt"));
    }

    #[test]
    fn auth_endpoints_and_health_are_public() {
        assert!(is_public(&Method::POST, "/api/auth/login"));
        assert!(is_public(&Method::POST, "/api/auth/register"));
        assert!(is_public(&Method::GET, "/health"));
        assert!(!is_public(&Method::GET, "/api/auth/me"));
    }

    #[test]
    fn cart_and_orders_require_auth() {
        assert!(!is_public(&Method::GET, "/api/cart"));
        assert!(!is_public(&Method::POST, "/api/orders"));
        assert!(!is_public(&Method::GET, "/api/orders/my"));
    }
}
