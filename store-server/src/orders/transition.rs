//! Order status transitions
//!
//! Applies admin-driven status changes and their side effects:
//!
//! - → DELIVERED stamps `delivered_at` and forces the payment status to PAID,
//!   which settles cash-on-delivery orders uniformly.
//! - → CANCELLED restores stock for every line, unconditionally. Repeated
//!   cancellations restore again: the transition is not idempotent, and no
//!   transition graph is enforced here.
//! - any other status is recorded with no side effect.
//!
//! Tracking fields are applied whenever present, regardless of status.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Order;
use crate::db::repository::{OrderRepository, ProductRepository, now_millis};
use crate::utils::{AppError, AppResult};
use shared::models::{OrderStatus, PaymentStatus, UpdateOrderStatusRequest};

/// Apply a partial status update to the order with this id.
pub async fn apply_status_update(
    db: &Surreal<Db>,
    order_id: &str,
    update: UpdateOrderStatusRequest,
) -> AppResult<Order> {
    let orders = OrderRepository::new(db.clone());
    let products = ProductRepository::new(db.clone());

    let mut order = orders
        .find_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;

    if let Some(status) = update.order_status {
        order.order_status = status;

        match status {
            OrderStatus::Delivered => {
                order.delivered_at = Some(now_millis());
                order.payment_status = PaymentStatus::Paid;
            }
            OrderStatus::Cancelled => {
                restore_order_stock(&products, &order).await;
            }
            _ => {}
        }
    }

    if update.tracking_number.is_some() {
        order.tracking_number = update.tracking_number;
    }
    if update.estimated_delivery.is_some() {
        order.estimated_delivery = update.estimated_delivery;
    }

    Ok(orders.update_row(order).await?)
}

/// Return every line's quantity to inventory. Best effort per line: a
/// failed restore is logged and the remaining lines still run.
async fn restore_order_stock(products: &ProductRepository, order: &Order) {
    for item in &order.items {
        if let Err(e) = products
            .restore_stock(&item.product, &item.variant.sku, item.quantity)
            .await
        {
            tracing::error!(
                order_number = %order.order_number,
                product = %item.product,
                sku = %item.variant.sku,
                quantity = item.quantity,
                error = %e,
                "Stock restoration failed during cancellation"
            );
        }
    }
}
