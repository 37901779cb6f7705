//! Cart API Handlers
//!
//! Stock verification happens here, against live product rows, before any
//! cart mutation. The cart itself never reserves stock; reservation is the
//! placement workflow's job.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Cart, Product};
use crate::db::repository::{CartRepository, ProductRepository};
use crate::utils::validation::validate_quantity;
use crate::utils::{AppError, AppResult};
use shared::models::{AddCartItemRequest, UpdateCartItemRequest};

/// Load the product and check the variant has at least `quantity` in stock
async fn verify_stock(
    products: &ProductRepository,
    product_id: &str,
    sku: &str,
    quantity: i64,
) -> AppResult<Product> {
    let product = products
        .find_by_id(product_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {product_id}")))?;

    match product.variant(sku) {
        Some(variant) if variant.stock >= quantity => Ok(product),
        Some(_) => Err(AppError::insufficient_stock(product.name)),
        None => Err(AppError::not_found(format!("Variant {sku}"))),
    }
}

/// GET /api/cart - the user's cart, created empty on first access
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Cart>> {
    let carts = CartRepository::new(state.db().clone());
    Ok(Json(carts.get_or_create(&user.id).await?))
}

/// POST /api/cart/items - add a variant, merging lines with the same
/// product and sku
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AddCartItemRequest>,
) -> AppResult<Json<Cart>> {
    validate_quantity(req.quantity)?;

    let products = ProductRepository::new(state.db().clone());
    let product = verify_stock(&products, &req.product, &req.variant.sku, req.quantity).await?;

    let carts = CartRepository::new(state.db().clone());
    let cart = carts
        .add_item(&user.id, &req.product, req.variant, req.quantity, product.price)
        .await?;
    Ok(Json(cart))
}

/// PATCH /api/cart/items/{item_id} - set a line's quantity
pub async fn update_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(item_id): Path<String>,
    Json(req): Json<UpdateCartItemRequest>,
) -> AppResult<Json<Cart>> {
    validate_quantity(req.quantity)?;

    let carts = CartRepository::new(state.db().clone());
    let cart = carts
        .find_by_user(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Cart"))?;
    let line = cart
        .items
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| AppError::not_found(format!("Cart item {item_id}")))?;

    let products = ProductRepository::new(state.db().clone());
    verify_stock(&products, &line.product, &line.variant.sku, req.quantity).await?;

    let cart = carts
        .update_item_quantity(&user.id, &item_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

/// DELETE /api/cart/items/{item_id}
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<Cart>> {
    let carts = CartRepository::new(state.db().clone());
    Ok(Json(carts.remove_item(&user.id, &item_id).await?))
}

/// DELETE /api/cart - empty the cart, keeping the row
pub async fn clear(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Cart>> {
    let carts = CartRepository::new(state.db().clone());
    Ok(Json(carts.clear(&user.id).await?))
}
