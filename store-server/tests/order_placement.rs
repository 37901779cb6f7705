//! End-to-end placement and status-transition behavior on an in-memory
//! database.

mod common;

use shared::models::{OrderQuery, OrderStatus, PaymentStatus, UpdateOrderStatusRequest};
use store_server::AppError;
use store_server::db::repository::{CartRepository, OrderRepository};
use store_server::orders::{apply_status_update, place_order};

use common::{mem_db, place_request, seed_product, seed_user, stock_of, variant_ref};

#[tokio::test]
async fn placement_decrements_stock_and_freezes_line_totals() {
    let db = mem_db().await;
    let user = seed_user(&db, "buyer@example.com").await;
    let product = seed_product(&db, "Blue Shirt", 100.0, &[("SKU-1", 5)]).await;

    let carts = CartRepository::new(db.clone());
    let product_id = product.id.as_ref().unwrap().to_string();
    carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-1"), 3, 100.0)
        .await
        .unwrap();

    let order = place_order(&db, &user.id_string(), place_request())
        .await
        .unwrap();

    assert!(order.order_number.starts_with("ORD"));
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(order.items[0].total, 300.0);
    assert_eq!(order.subtotal, 300.0);
    assert_eq!(order.shipping_cost, 100.0);
    assert_eq!(order.tax, 30.0);
    assert_eq!(order.total, 430.0);

    // Inventory decremented and cart drained
    assert_eq!(stock_of(&db, &product, "SKU-1").await, 2);
    let cart = carts.find_by_user(&user.id_string()).await.unwrap().unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_price, 0.0);
}

#[tokio::test]
async fn large_orders_ship_free() {
    let db = mem_db().await;
    let user = seed_user(&db, "bulk@example.com").await;
    let product = seed_product(&db, "Coat", 600.0, &[("SKU-C", 10)]).await;

    let carts = CartRepository::new(db.clone());
    let product_id = product.id.as_ref().unwrap().to_string();
    carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-C"), 2, 600.0)
        .await
        .unwrap();

    let order = place_order(&db, &user.id_string(), place_request())
        .await
        .unwrap();
    assert_eq!(order.subtotal, 1200.0);
    assert_eq!(order.shipping_cost, 0.0);
    assert_eq!(order.total, 1320.0);
}

#[tokio::test]
async fn insufficient_stock_rejects_without_any_mutation() {
    let db = mem_db().await;
    let user = seed_user(&db, "greedy@example.com").await;
    let product = seed_product(&db, "Rare Item", 50.0, &[("SKU-R", 2)]).await;

    // Bypass the handler-level stock check to simulate stock dropping after
    // the item went into the cart
    let carts = CartRepository::new(db.clone());
    let product_id = product.id.as_ref().unwrap().to_string();
    carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-R"), 3, 50.0)
        .await
        .unwrap();

    let err = place_order(&db, &user.id_string(), place_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock(_)));

    // Nothing moved: stock intact, cart intact, no order row
    assert_eq!(stock_of(&db, &product, "SKU-R").await, 2);
    let cart = carts.find_by_user(&user.id_string()).await.unwrap().unwrap();
    assert_eq!(cart.items.len(), 1);

    let orders = OrderRepository::new(db.clone());
    let (rows, total) = orders.find_all(&OrderQuery::default()).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn empty_cart_cannot_place() {
    let db = mem_db().await;
    let user = seed_user(&db, "empty@example.com").await;

    let err = place_order(&db, &user.id_string(), place_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyCart));

    // Same when the cart exists but has no lines
    CartRepository::new(db.clone())
        .get_or_create(&user.id_string())
        .await
        .unwrap();
    let err = place_order(&db, &user.id_string(), place_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyCart));
}

#[tokio::test]
async fn delivery_marks_payment_paid_and_stamps_time() {
    let db = mem_db().await;
    let user = seed_user(&db, "receiver@example.com").await;
    let product = seed_product(&db, "Lamp", 80.0, &[("SKU-L", 4)]).await;

    let carts = CartRepository::new(db.clone());
    let product_id = product.id.as_ref().unwrap().to_string();
    carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-L"), 1, 80.0)
        .await
        .unwrap();
    let order = place_order(&db, &user.id_string(), place_request())
        .await
        .unwrap();

    let order_id = order.id.as_ref().unwrap().to_string();
    let updated = apply_status_update(
        &db,
        &order_id,
        UpdateOrderStatusRequest {
            order_status: Some(OrderStatus::Delivered),
            tracking_number: Some("TRK-9".to_string()),
            estimated_delivery: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.order_status, OrderStatus::Delivered);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
    assert!(updated.delivered_at.is_some());
    assert_eq!(updated.tracking_number.as_deref(), Some("TRK-9"));
}

#[tokio::test]
async fn cancellation_restores_stock_each_time_it_is_applied() {
    let db = mem_db().await;
    let user = seed_user(&db, "cancels@example.com").await;
    let product = seed_product(&db, "Mug", 20.0, &[("SKU-M", 5)]).await;

    let carts = CartRepository::new(db.clone());
    let product_id = product.id.as_ref().unwrap().to_string();
    carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-M"), 3, 20.0)
        .await
        .unwrap();
    let order = place_order(&db, &user.id_string(), place_request())
        .await
        .unwrap();
    assert_eq!(stock_of(&db, &product, "SKU-M").await, 2);

    let order_id = order.id.as_ref().unwrap().to_string();
    let cancel = UpdateOrderStatusRequest {
        order_status: Some(OrderStatus::Cancelled),
        tracking_number: None,
        estimated_delivery: None,
    };

    apply_status_update(&db, &order_id, cancel.clone())
        .await
        .unwrap();
    assert_eq!(stock_of(&db, &product, "SKU-M").await, 5);

    // Restoration is not idempotent: a second CANCELLED restores again
    apply_status_update(&db, &order_id, cancel).await.unwrap();
    assert_eq!(stock_of(&db, &product, "SKU-M").await, 8);
}

#[tokio::test]
async fn consecutive_orders_get_distinct_numbers() {
    let db = mem_db().await;
    let user = seed_user(&db, "repeat@example.com").await;
    let product = seed_product(&db, "Socks", 10.0, &[("SKU-S", 20)]).await;

    let carts = CartRepository::new(db.clone());
    let product_id = product.id.as_ref().unwrap().to_string();

    let mut numbers = Vec::new();
    for _ in 0..3 {
        carts
            .add_item(&user.id_string(), &product_id, variant_ref("SKU-S"), 1, 10.0)
            .await
            .unwrap();
        let order = place_order(&db, &user.id_string(), place_request())
            .await
            .unwrap();
        numbers.push(order.order_number);
    }

    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 3);
}

#[tokio::test]
async fn users_only_see_their_own_orders() {
    let db = mem_db().await;
    let alice = seed_user(&db, "alice@example.com").await;
    let bob = seed_user(&db, "bob@example.com").await;
    let product = seed_product(&db, "Hat", 30.0, &[("SKU-H", 10)]).await;

    let carts = CartRepository::new(db.clone());
    let product_id = product.id.as_ref().unwrap().to_string();
    for user in [&alice, &bob] {
        carts
            .add_item(&user.id_string(), &product_id, variant_ref("SKU-H"), 1, 30.0)
            .await
            .unwrap();
        place_order(&db, &user.id_string(), place_request())
            .await
            .unwrap();
    }

    let orders = OrderRepository::new(db.clone());
    let (mine, total) = orders
        .find_for_user(&alice.id_string(), &OrderQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user, alice.id_string());

    let (all, all_total) = orders.find_all(&OrderQuery::default()).await.unwrap();
    assert_eq!(all_total, 2);
    assert_eq!(all.len(), 2);
}
