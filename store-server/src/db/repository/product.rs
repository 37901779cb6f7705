//! Product Repository
//!
//! Catalog CRUD plus the inventory ledger. Stock mutations are expressed as
//! single transactional scripts so the decrement is the authoritative gate:
//! the guard and the write land in one round trip, never as a separate
//! read-then-write from the caller's side.

use std::collections::HashMap;

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, now_millis, record_id};
use crate::db::models::Product;
use shared::models::{ProductCreate, ProductQuery, ProductUpdate, slugify};

const PRODUCT_TABLE: &str = "product";

/// Default page size for catalog listings
const DEFAULT_PAGE_LIMIT: u64 = 12;

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Create a new product. Slug and variant SKUs must be unique.
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let slug = match data.slug {
            Some(ref s) if !s.trim().is_empty() => s.clone(),
            _ => slugify(&data.name),
        };
        if slug.is_empty() {
            return Err(RepoError::Validation("slug cannot be empty".into()));
        }

        if self.slug_exists(&slug).await? {
            return Err(RepoError::Conflict(format!(
                "Product with slug {slug} already exists"
            )));
        }

        self.check_skus_available(&data.variants.iter().map(|v| v.sku.clone()).collect::<Vec<_>>(), None)
            .await?;

        let now = now_millis();
        let total_stock = data.variants.iter().map(|v| v.stock).sum();
        let product = Product {
            id: None,
            name: data.name,
            slug,
            description: data.description,
            category: data.category,
            subcategory: data.subcategory,
            brand: data.brand,
            price: data.price,
            compare_price: data.compare_price,
            images: data.images,
            variants: data.variants,
            tags: data.tags.unwrap_or_default(),
            featured: data.featured.unwrap_or(false),
            is_active: true,
            total_stock,
            ratings: 0.0,
            num_reviews: 0,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Find an active product by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE slug = $slug AND is_active = true LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;
        Ok(product)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let rid = record_id(PRODUCT_TABLE, id)?;
        let product: Option<Product> = self.base.db().select(rid).await?;
        Ok(product)
    }

    /// Filtered, paginated catalog listing (active products only).
    ///
    /// Returns the page and the total match count.
    pub async fn find_paginated(&self, query: &ProductQuery) -> RepoResult<(Vec<Product>, u64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, 100);
        let start = (page - 1) * limit;

        let mut conditions = vec!["is_active = true".to_string()];
        if query.search.is_some() {
            conditions.push(
                "(string::lowercase(name) CONTAINS $search \
                  OR string::lowercase(description) CONTAINS $search)"
                    .to_string(),
            );
        }
        if query.category.is_some() {
            conditions.push("category = $category".to_string());
        }
        if query.subcategory.is_some() {
            conditions.push("subcategory = $subcategory".to_string());
        }
        if query.brand.is_some() {
            conditions.push("brand = $brand".to_string());
        }
        if query.size.is_some() {
            conditions.push("count(variants[WHERE size = $size]) > 0".to_string());
        }
        if query.color.is_some() {
            conditions.push("count(variants[WHERE color = $color]) > 0".to_string());
        }
        if query.min_price.is_some() {
            conditions.push("price >= $min_price".to_string());
        }
        if query.max_price.is_some() {
            conditions.push("price <= $max_price".to_string());
        }
        let where_clause = conditions.join(" AND ");

        let list_sql = format!(
            "SELECT * FROM product WHERE {where_clause} \
             ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count_sql = format!("SELECT count() FROM product WHERE {where_clause} GROUP ALL");

        let mut req = self
            .base
            .db()
            .query(list_sql)
            .query(count_sql)
            .bind(("limit", limit as i64))
            .bind(("start", start as i64));
        if let Some(search) = &query.search {
            req = req.bind(("search", search.to_lowercase()));
        }
        if let Some(category) = &query.category {
            req = req.bind(("category", category.clone()));
        }
        if let Some(subcategory) = &query.subcategory {
            req = req.bind(("subcategory", subcategory.clone()));
        }
        if let Some(brand) = &query.brand {
            req = req.bind(("brand", brand.clone()));
        }
        if let Some(size) = &query.size {
            req = req.bind(("size", size.clone()));
        }
        if let Some(color) = &query.color {
            req = req.bind(("color", color.clone()));
        }
        if let Some(min_price) = query.min_price {
            req = req.bind(("min_price", min_price));
        }
        if let Some(max_price) = query.max_price {
            req = req.bind(("max_price", max_price));
        }

        let mut result = req.await?;
        let products: Vec<Product> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);

        Ok((products, total))
    }

    /// Apply a partial update to the product with this slug.
    ///
    /// `total_stock` is recomputed from the resulting variants so the cached
    /// sum stays consistent with every write.
    pub async fn update_by_slug(&self, slug: &str, data: ProductUpdate) -> RepoResult<Product> {
        let mut product: Product = self
            .base
            .db()
            .query("SELECT * FROM product WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?
            .take::<Option<Product>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Product {slug}")))?;

        let rid = product
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Product row without id".to_string()))?;

        if let Some(variants) = &data.variants {
            let skus: Vec<String> = variants.iter().map(|v| v.sku.clone()).collect();
            self.check_skus_available(&skus, Some(&rid.to_string())).await?;
        }

        if let Some(name) = data.name {
            product.name = name;
        }
        if let Some(description) = data.description {
            product.description = description;
        }
        if let Some(category) = data.category {
            product.category = category;
        }
        if data.subcategory.is_some() {
            product.subcategory = data.subcategory;
        }
        if data.brand.is_some() {
            product.brand = data.brand;
        }
        if let Some(price) = data.price {
            product.price = price;
        }
        if data.compare_price.is_some() {
            product.compare_price = data.compare_price;
        }
        if let Some(images) = data.images {
            product.images = images;
        }
        if let Some(variants) = data.variants {
            product.variants = variants;
        }
        if let Some(tags) = data.tags {
            product.tags = tags;
        }
        if let Some(featured) = data.featured {
            product.featured = featured;
        }
        if let Some(is_active) = data.is_active {
            product.is_active = is_active;
        }
        product.total_stock = product.summed_stock();
        product.updated_at = now_millis();

        let mut row = product;
        row.id = None;
        let updated: Option<Product> = self.base.db().update(rid).content(row).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update product".to_string()))
    }

    /// Soft delete: the product stays referenced by carts and orders.
    pub async fn soft_delete_by_slug(&self, slug: &str) -> RepoResult<Product> {
        let deleted: Option<Product> = self
            .base
            .db()
            .query(
                "UPDATE product SET is_active = false, updated_at = $now \
                 WHERE slug = $slug RETURN AFTER",
            )
            .bind(("slug", slug.to_string()))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;

        deleted.ok_or_else(|| RepoError::NotFound(format!("Product {slug}")))
    }

    // =========================================================================
    // Inventory ledger
    // =========================================================================

    /// Decrement the named variant's stock by `quantity`.
    ///
    /// Fails with `InsufficientStock` when current stock < quantity at the
    /// time of the decrement, and with `NotFound` when the product or variant
    /// does not exist. The whole script runs as one transaction, so the stock
    /// check and the write cannot interleave with a concurrent reservation.
    pub async fn reserve_stock(
        &self,
        product_id: &str,
        sku: &str,
        quantity: i64,
    ) -> RepoResult<()> {
        if quantity < 1 {
            return Err(RepoError::Validation("quantity must be at least 1".into()));
        }
        let rid = record_id(PRODUCT_TABLE, product_id)?;

        let mut result = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 LET $p = (SELECT * FROM ONLY $product);
                 IF $p = NONE { THROW 'product_not_found' };
                 LET $old = $p.variants[WHERE sku = $sku][0];
                 IF $old = NONE { THROW 'variant_not_found' };
                 IF $old.stock < $qty { THROW 'insufficient_stock' };
                 UPDATE $product SET
                     variants -= $old,
                     variants += { size: $old.size, color: $old.color, sku: $old.sku, stock: $old.stock - $qty },
                     total_stock -= $qty,
                     updated_at = $now;
                 COMMIT TRANSACTION;",
            )
            .bind(("product", rid))
            .bind(("sku", sku.to_string()))
            .bind(("qty", quantity))
            .bind(("now", now_millis()))
            .await?;

        let errors = result.take_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::classify_stock_error(errors, product_id, sku))
        }
    }

    /// Increment the named variant's stock by `quantity`, unconditionally.
    ///
    /// Terminal order states justify restoration regardless of prior value.
    pub async fn restore_stock(
        &self,
        product_id: &str,
        sku: &str,
        quantity: i64,
    ) -> RepoResult<()> {
        if quantity < 1 {
            return Err(RepoError::Validation("quantity must be at least 1".into()));
        }
        let rid = record_id(PRODUCT_TABLE, product_id)?;

        let mut result = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 LET $p = (SELECT * FROM ONLY $product);
                 IF $p = NONE { THROW 'product_not_found' };
                 LET $old = $p.variants[WHERE sku = $sku][0];
                 IF $old = NONE { THROW 'variant_not_found' };
                 UPDATE $product SET
                     variants -= $old,
                     variants += { size: $old.size, color: $old.color, sku: $old.sku, stock: $old.stock + $qty },
                     total_stock += $qty,
                     updated_at = $now;
                 COMMIT TRANSACTION;",
            )
            .bind(("product", rid))
            .bind(("sku", sku.to_string()))
            .bind(("qty", quantity))
            .bind(("now", now_millis()))
            .await?;

        let errors = result.take_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::classify_stock_error(errors, product_id, sku))
        }
    }

    /// A failed transaction reports the generic "not executed" error on the
    /// statement that wrote; the THROW message sits on its own statement. Scan
    /// every per-statement error for the markers before giving up.
    fn classify_stock_error(
        errors: HashMap<usize, surrealdb::Error>,
        product_id: &str,
        sku: &str,
    ) -> RepoError {
        let messages: Vec<String> = errors.into_values().map(|e| e.to_string()).collect();
        if messages.iter().any(|m| m.contains("insufficient_stock")) {
            RepoError::InsufficientStock(format!("{product_id} ({sku})"))
        } else if messages.iter().any(|m| m.contains("product_not_found")) {
            RepoError::NotFound(format!("Product {product_id}"))
        } else if messages.iter().any(|m| m.contains("variant_not_found")) {
            RepoError::NotFound(format!("Variant {sku} of product {product_id}"))
        } else {
            RepoError::Database(messages.join("; "))
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        let existing: Option<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;
        Ok(existing.is_some())
    }

    /// SKUs are globally unique across the catalog. Checks both duplicates
    /// within the payload and collisions with other products.
    async fn check_skus_available(
        &self,
        skus: &[String],
        exclude_product_id: Option<&str>,
    ) -> RepoResult<()> {
        for (i, sku) in skus.iter().enumerate() {
            if skus[..i].contains(sku) {
                return Err(RepoError::Validation(format!("Duplicate sku {sku} in payload")));
            }
        }
        if skus.is_empty() {
            return Ok(());
        }

        #[derive(Debug, Deserialize)]
        struct Found {
            slug: String,
        }

        let sql = match exclude_product_id {
            Some(_) => {
                "SELECT slug FROM product \
                 WHERE count(variants[WHERE sku IN $skus]) > 0 AND id != $exclude"
            }
            None => "SELECT slug FROM product WHERE count(variants[WHERE sku IN $skus]) > 0",
        };

        let mut req = self
            .base
            .db()
            .query(sql)
            .bind(("skus", skus.to_vec()));
        if let Some(exclude) = exclude_product_id {
            req = req.bind(("exclude", record_id(PRODUCT_TABLE, exclude)?));
        }

        let found: Vec<Found> = req.await?.take(0)?;
        if let Some(hit) = found.first() {
            return Err(RepoError::Conflict(format!(
                "SKU already used by product {}",
                hit.slug
            )));
        }
        Ok(())
    }
}
