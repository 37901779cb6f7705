//! Cart Repository
//!
//! One cart per user, created lazily on first access. Every mutating
//! operation recomputes the derived totals before persisting, so
//! `total_items`/`total_price` are always consistent after a write.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult, now_millis, record_id};
use crate::db::models::{Cart, CartItem};
use shared::models::VariantRef;

const CART_TABLE: &str = "cart";
const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Option<Cart>> {
        let user = record_id(USER_TABLE, user_id)?.to_string();
        let cart: Option<Cart> = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE user = $user LIMIT 1")
            .bind(("user", user))
            .await?
            .take(0)?;
        Ok(cart)
    }

    /// Fetch the user's cart, creating an empty one on first access.
    pub async fn get_or_create(&self, user_id: &str) -> RepoResult<Cart> {
        if let Some(cart) = self.find_by_user(user_id).await? {
            return Ok(cart);
        }

        let user = record_id(USER_TABLE, user_id)?.to_string();
        let created: Result<Option<Cart>, surrealdb::Error> = self
            .base
            .db()
            .create(CART_TABLE)
            .content(Cart::empty(user, now_millis()))
            .await;

        match created {
            Ok(Some(cart)) => Ok(cart),
            Ok(None) => Err(RepoError::Database("Failed to create cart".to_string())),
            // Unique index on `user`: a concurrent first access won the race
            Err(e) if e.to_string().contains("already contains") => self
                .find_by_user(user_id)
                .await?
                .ok_or_else(|| RepoError::Database("Cart vanished after create race".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Merge into an existing line (same product + sku) by incrementing its
    /// quantity, or append a new line. The caller verifies live stock first.
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        variant: VariantRef,
        quantity: i64,
        unit_price: f64,
    ) -> RepoResult<Cart> {
        let product = record_id("product", product_id)?.to_string();
        let mut cart = self.get_or_create(user_id).await?;

        match cart
            .items
            .iter_mut()
            .find(|item| item.product == product && item.variant.sku == variant.sku)
        {
            Some(line) => line.quantity += quantity,
            None => cart.items.push(CartItem {
                id: Uuid::new_v4().to_string(),
                product,
                variant,
                quantity,
                price: unit_price,
            }),
        }

        self.save(cart).await
    }

    /// Set a line's quantity. The caller verifies live stock on increase.
    pub async fn update_item_quantity(
        &self,
        user_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> RepoResult<Cart> {
        let mut cart = self
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cart".to_string()))?;

        let line = cart
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| RepoError::NotFound(format!("Cart item {item_id}")))?;
        line.quantity = quantity;

        self.save(cart).await
    }

    pub async fn remove_item(&self, user_id: &str, item_id: &str) -> RepoResult<Cart> {
        let mut cart = self
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cart".to_string()))?;

        let before = cart.items.len();
        cart.items.retain(|item| item.id != item_id);
        if cart.items.len() == before {
            return Err(RepoError::NotFound(format!("Cart item {item_id}")));
        }

        self.save(cart).await
    }

    /// Empty all lines. The cart row itself is kept.
    pub async fn clear(&self, user_id: &str) -> RepoResult<Cart> {
        let mut cart = self
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cart".to_string()))?;
        cart.items.clear();
        self.save(cart).await
    }

    /// Persist with totals recomputed
    async fn save(&self, mut cart: Cart) -> RepoResult<Cart> {
        cart.recompute_totals();
        cart.updated_at = now_millis();

        let rid = cart
            .id
            .take()
            .ok_or_else(|| RepoError::Database("Cart row without id".to_string()))?;

        let updated: Option<Cart> = self.base.db().update(rid).content(cart).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to save cart".to_string()))
    }
}
