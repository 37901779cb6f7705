//! Product API module
//!
//! Public catalog reads, admin-only writes. Products are addressed by slug.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{slug}",
            get(handler::get_by_slug)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
