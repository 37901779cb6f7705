//! Order Repository
//!
//! Orders are inserted once at placement and never deleted; later writes only
//! touch status, payment and tracking fields. Order numbers draw from a
//! dedicated counter record so two placements in the same millisecond still
//! get distinct numbers.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::Order;
use shared::models::OrderQuery;

// "orders" rather than "order": ORDER is a reserved word in SurrealQL
const ORDER_TABLE: &str = "orders";
const USER_TABLE: &str = "user";

/// Default page size for order listings
const DEFAULT_PAGE_LIMIT: u64 = 10;

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct CounterRow {
    value: u64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Next value of the order-number sequence, atomically incremented
    pub async fn next_sequence(&self) -> RepoResult<u64> {
        let rows: Vec<CounterRow> = self
            .base
            .db()
            .query("UPSERT counter:orders SET value += 1 RETURN AFTER")
            .await?
            .take(0)?;
        rows.first()
            .map(|r| r.value)
            .ok_or_else(|| RepoError::Database("Order counter returned no row".to_string()))
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = record_id(ORDER_TABLE, id)?;
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order)
    }

    pub async fn find_by_number(&self, order_number: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE order_number = $number LIMIT 1")
            .bind(("number", order_number.to_string()))
            .await?
            .take(0)?;
        Ok(order)
    }

    /// A user's own orders, newest first
    pub async fn find_for_user(
        &self,
        user_id: &str,
        query: &OrderQuery,
    ) -> RepoResult<(Vec<Order>, u64)> {
        let user = record_id(USER_TABLE, user_id)?.to_string();
        let mut conditions = vec!["user = $user".to_string()];
        if query.status.is_some() {
            conditions.push("order_status = $status".to_string());
        }
        self.find_filtered(conditions, Some(user), query).await
    }

    /// All orders (admin), newest first
    pub async fn find_all(&self, query: &OrderQuery) -> RepoResult<(Vec<Order>, u64)> {
        let mut conditions = Vec::new();
        if query.status.is_some() {
            conditions.push("order_status = $status".to_string());
        }
        if query.payment_status.is_some() {
            conditions.push("payment_status = $payment_status".to_string());
        }
        self.find_filtered(conditions, None, query).await
    }

    /// Persist status/payment/tracking mutations on an existing order
    pub async fn update_row(&self, mut order: Order) -> RepoResult<Order> {
        let rid = order
            .id
            .take()
            .ok_or_else(|| RepoError::Database("Order row without id".to_string()))?;
        let updated: Option<Order> = self.base.db().update(rid).content(order).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update order".to_string()))
    }

    async fn find_filtered(
        &self,
        conditions: Vec<String>,
        user: Option<String>,
        query: &OrderQuery,
    ) -> RepoResult<(Vec<Order>, u64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, 100);
        let start = (page - 1) * limit;

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let list_sql = format!(
            "SELECT * FROM orders{where_clause} \
             ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count_sql = format!("SELECT count() FROM orders{where_clause} GROUP ALL");

        let mut req = self
            .base
            .db()
            .query(list_sql)
            .query(count_sql)
            .bind(("limit", limit as i64))
            .bind(("start", start as i64));
        if let Some(user) = user {
            req = req.bind(("user", user));
        }
        if let Some(status) = query.status {
            req = req.bind(("status", status));
        }
        if let Some(payment_status) = query.payment_status {
            req = req.bind(("payment_status", payment_status));
        }

        let mut result = req.await?;
        let orders: Vec<Order> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);

        Ok((orders, total))
    }
}
