//! Order API module
//!
//! Placement and retrieval for customers, listing and status updates for
//! admins.

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place).get(handler::list_all))
        .route("/my", get(handler::list_mine))
        .route("/number/{order_number}", get(handler::get_by_number))
        .route("/{id}/status", patch(handler::update_status))
}
