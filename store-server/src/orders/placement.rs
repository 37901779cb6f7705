//! Order placement workflow
//!
//! Orchestrates cart → stock check → order creation → stock reservation →
//! cart clearing. The steps span independent persistence calls with no
//! umbrella transaction: each per-variant decrement is atomic on its own,
//! but the sequence as a whole is not. A decrement that fails after the
//! order insert is logged and leaves the cart unharvested as the recovery
//! signal; the created order is still returned.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Order, OrderItem};
use crate::db::repository::{CartRepository, OrderRepository, ProductRepository, now_millis};
use crate::orders::{money, number, totals};
use crate::utils::{AppError, AppResult};
use shared::models::{OrderStatus, PaymentStatus, PlaceOrderRequest};

/// Place an order from the user's current cart.
///
/// Fails with `EmptyCart` when the cart is absent or has no lines, and with
/// `InsufficientStock` when any line's requested quantity exceeds the live
/// stock at pre-check time. The pre-check happens before any mutation; the
/// per-line decrement remains the authoritative gate afterwards.
pub async fn place_order(
    db: &Surreal<Db>,
    user_id: &str,
    request: PlaceOrderRequest,
) -> AppResult<Order> {
    let carts = CartRepository::new(db.clone());
    let products = ProductRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    // 1. Load the cart
    let cart = carts.find_by_user(user_id).await?;
    let cart = match cart {
        Some(c) if !c.items.is_empty() => c,
        _ => return Err(AppError::EmptyCart),
    };

    // 2. Re-verify live stock for every line before any mutation
    for item in &cart.items {
        let product = products
            .find_by_id(&item.product)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", item.product)))?;
        match product.variant(&item.variant.sku) {
            Some(variant) if variant.stock >= item.quantity => {}
            _ => return Err(AppError::insufficient_stock(product.name)),
        }
    }

    // 3. Totals from the cart's cached subtotal
    let totals = totals::compute(cart.total_price);

    // 4. Immutable line snapshots
    let items: Vec<OrderItem> = cart
        .items
        .iter()
        .map(|item| OrderItem {
            product: item.product.clone(),
            variant: item.variant.clone(),
            quantity: item.quantity,
            price: item.price,
            total: money::line_total(item.price, item.quantity),
        })
        .collect();

    // 5. Persist the order
    let order_number = number::generate(&orders).await?;
    let order = Order {
        id: None,
        order_number,
        user: cart.user.clone(),
        items,
        shipping_address: request.shipping_address,
        payment_method: request.payment_method,
        payment_status: PaymentStatus::Pending,
        order_status: OrderStatus::Pending,
        subtotal: totals.subtotal,
        shipping_cost: totals.shipping_cost,
        tax: totals.tax,
        total: totals.total,
        notes: request.notes,
        tracking_number: None,
        estimated_delivery: None,
        delivered_at: None,
        created_at: now_millis(),
    };
    let order = orders.create(order).await?;

    // 6. Reserve stock per line. Calls are independent; earlier decrements
    //    stay applied when a later line fails.
    let mut all_reserved = true;
    for item in &cart.items {
        if let Err(e) = products
            .reserve_stock(&item.product, &item.variant.sku, item.quantity)
            .await
        {
            all_reserved = false;
            tracing::error!(
                order_number = %order.order_number,
                product = %item.product,
                sku = %item.variant.sku,
                quantity = item.quantity,
                error = %e,
                "Stock reservation failed after order creation; cart left intact for reconciliation"
            );
        }
    }

    // 7. Drain the cart only when every reservation landed
    if all_reserved {
        if let Err(e) = carts.clear(user_id).await {
            tracing::warn!(
                order_number = %order.order_number,
                error = %e,
                "Failed to clear cart after placement"
            );
        }
    }

    Ok(order)
}
