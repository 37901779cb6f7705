//! CurrentUser extractor
//!
//! Lets protected handlers take `user: CurrentUser` as an argument. The
//! auth middleware normally populates request extensions; when a request
//! reaches a handler without it (middleware bypassed in tests, or a public
//! route upgraded later), the extractor falls back to validating the
//! Authorization header itself.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(value) => JwtService::extract_from_header(value).ok_or(AppError::InvalidToken)?,
            None => return Err(AppError::Unauthorized),
        };

        match state.jwt().validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(JwtError::ExpiredToken) => Err(AppError::TokenExpired),
            Err(_) => Err(AppError::InvalidToken),
        }
    }
}
