//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Product;
use crate::db::repository::ProductRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_price, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{ProductCreate, ProductQuery, ProductUpdate, Variant};
use shared::response::{PageMeta, Paginated};

fn validate_variants(variants: &[Variant]) -> AppResult<()> {
    if variants.is_empty() {
        return Err(AppError::validation("At least one variant is required"));
    }
    for variant in variants {
        validate_required_text(&variant.sku, "sku", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&variant.size, "size", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&variant.color, "color", MAX_SHORT_TEXT_LEN)?;
        if variant.stock < 0 {
            return Err(AppError::validation("Variant stock must not be negative"));
        }
    }
    Ok(())
}

/// GET /api/products - public catalog listing with filters and pagination
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Paginated<Product>>> {
    let repo = ProductRepository::new(state.db().clone());
    let (products, total) = repo.find_paginated(&query).await?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(12).clamp(1, 100);
    Ok(Json(Paginated {
        data: products,
        meta: PageMeta::new(total, page, limit),
    }))
}

/// GET /api/products/{slug} - public, active products only
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db().clone());
    let product = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {slug}")))?;
    Ok(Json(product))
}

/// POST /api/products - admin only
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    user.require_admin()?;

    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.description, "description", MAX_NOTE_LEN)?;
    validate_required_text(&req.category, "category", MAX_NAME_LEN)?;
    validate_price(req.price, "price")?;
    validate_variants(&req.variants)?;

    let repo = ProductRepository::new(state.db().clone());
    let product = repo.create(req).await?;
    tracing::info!(slug = %product.slug, "Product created");
    Ok(Json(product))
}

/// PATCH /api/products/{slug} - admin only, partial update
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    Json(req): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    user.require_admin()?;

    if let Some(name) = &req.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = req.price {
        validate_price(price, "price")?;
    }
    if let Some(variants) = &req.variants {
        validate_variants(variants)?;
    }

    let repo = ProductRepository::new(state.db().clone());
    Ok(Json(repo.update_by_slug(&slug, req).await?))
}

/// DELETE /api/products/{slug} - admin only, soft delete
///
/// The row survives so existing order lines keep resolving; the product
/// just stops appearing in the catalog.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> AppResult<Json<Product>> {
    user.require_admin()?;

    let repo = ProductRepository::new(state.db().clone());
    let product = repo.soft_delete_by_slug(&slug).await?;
    tracing::info!(slug = %product.slug, "Product deactivated");
    Ok(Json(product))
}
