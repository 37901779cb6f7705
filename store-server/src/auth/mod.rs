//! Authentication and authorization
//!
//! - [`JwtService`] issues and validates bearer tokens
//! - [`require_auth`] middleware guards protected routes
//! - [`CurrentUser`] carries the authenticated identity into handlers
//! - [`password`] hashes and verifies account passwords

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
