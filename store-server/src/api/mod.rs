//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - registration, login, current user
//! - [`products`] - catalog reads (public) and admin writes
//! - [`cart`] - per-user shopping cart
//! - [`orders`] - placement, retrieval and admin status updates
//!
//! Authentication is layered on top of this router in
//! [`crate::core::Server`]; handlers only decide authorization.

pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;

use crate::core::ServerState;

pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(cart::router())
        .merge(orders::router())
        .with_state(state)
}
