//! Cart mutation and catalog behavior on an in-memory database.

mod common;

use shared::models::{ProductQuery, ProductUpdate, Variant};
use store_server::db::repository::{CartRepository, ProductRepository, RepoError};

use common::{mem_db, seed_product, seed_user, variant_ref};

#[tokio::test]
async fn adding_same_variant_merges_lines_and_recomputes_totals() {
    let db = mem_db().await;
    let user = seed_user(&db, "cart@example.com").await;
    let product = seed_product(&db, "Shirt", 25.0, &[("SKU-A", 10), ("SKU-B", 10)]).await;
    let product_id = product.id.as_ref().unwrap().to_string();

    let carts = CartRepository::new(db.clone());
    let cart = carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-A"), 1, 25.0)
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total_items, 1);
    assert_eq!(cart.total_price, 25.0);

    // Same product + sku merges into the existing line
    let cart = carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-A"), 2, 25.0)
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.total_items, 3);
    assert_eq!(cart.total_price, 75.0);

    // Different sku appends a new line
    let cart = carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-B"), 1, 25.0)
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_items, 4);
    assert_eq!(cart.total_price, 100.0);
}

#[tokio::test]
async fn persisted_totals_are_exact_for_float_hostile_prices() {
    let db = mem_db().await;
    let user = seed_user(&db, "decimal@example.com").await;
    let product = seed_product(&db, "Sticker", 0.1, &[("D-1", 10), ("D-2", 10)]).await;
    let product_id = product.id.as_ref().unwrap().to_string();

    let carts = CartRepository::new(db.clone());
    carts
        .add_item(&user.id_string(), &product_id, variant_ref("D-1"), 1, 0.1)
        .await
        .unwrap();
    carts
        .add_item(&user.id_string(), &product_id, variant_ref("D-2"), 1, 0.2)
        .await
        .unwrap();

    // Read back from storage: no binary float artifacts may survive
    let stored = carts
        .find_by_user(&user.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.total_price, 0.3);
}

#[tokio::test]
async fn line_update_and_removal_keep_totals_consistent() {
    let db = mem_db().await;
    let user = seed_user(&db, "edit@example.com").await;
    let product = seed_product(&db, "Pants", 40.0, &[("SKU-P", 10)]).await;
    let product_id = product.id.as_ref().unwrap().to_string();

    let carts = CartRepository::new(db.clone());
    let cart = carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-P"), 2, 40.0)
        .await
        .unwrap();
    let line_id = cart.items[0].id.clone();

    let cart = carts
        .update_item_quantity(&user.id_string(), &line_id, 5)
        .await
        .unwrap();
    assert_eq!(cart.items[0].quantity, 5);
    assert_eq!(cart.total_price, 200.0);

    let cart = carts
        .remove_item(&user.id_string(), &line_id)
        .await
        .unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_items, 0);
    assert_eq!(cart.total_price, 0.0);

    // Removing an unknown line is an error, not a no-op
    let err = carts
        .remove_item(&user.id_string(), "no-such-line")
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn clearing_empties_lines_but_keeps_the_cart_row() {
    let db = mem_db().await;
    let user = seed_user(&db, "clear@example.com").await;
    let product = seed_product(&db, "Scarf", 15.0, &[("SKU-X", 5)]).await;
    let product_id = product.id.as_ref().unwrap().to_string();

    let carts = CartRepository::new(db.clone());
    carts
        .add_item(&user.id_string(), &product_id, variant_ref("SKU-X"), 2, 15.0)
        .await
        .unwrap();

    let cleared = carts.clear(&user.id_string()).await.unwrap();
    assert!(cleared.items.is_empty());
    assert_eq!(cleared.total_price, 0.0);

    let reloaded = carts.find_by_user(&user.id_string()).await.unwrap();
    assert!(reloaded.is_some());
}

#[tokio::test]
async fn one_cart_per_user() {
    let db = mem_db().await;
    let user = seed_user(&db, "single@example.com").await;

    let carts = CartRepository::new(db.clone());
    let a = carts.get_or_create(&user.id_string()).await.unwrap();
    let b = carts.get_or_create(&user.id_string()).await.unwrap();
    assert_eq!(a.id, b.id);
}

#[tokio::test]
async fn product_create_derives_slug_and_total_stock() {
    let db = mem_db().await;
    let product = seed_product(&db, "Mega Cool Jacket!", 199.0, &[("J-1", 3), ("J-2", 4)]).await;

    assert_eq!(product.slug, "mega-cool-jacket");
    assert_eq!(product.total_stock, 7);

    let repo = ProductRepository::new(db.clone());
    let found = repo.find_by_slug("mega-cool-jacket").await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let db = mem_db().await;
    seed_product(&db, "Same Name", 10.0, &[("S-1", 1)]).await;

    let repo = ProductRepository::new(db.clone());
    let err = repo
        .create(shared::models::ProductCreate {
            name: "Same Name".to_string(),
            slug: None,
            description: "dup".to_string(),
            category: "misc".to_string(),
            subcategory: None,
            brand: None,
            price: 10.0,
            compare_price: None,
            images: vec![],
            variants: vec![Variant {
                size: "M".to_string(),
                color: "red".to_string(),
                sku: "S-2".to_string(),
                stock: 1,
            }],
            tags: None,
            featured: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[tokio::test]
async fn variant_update_recomputes_total_stock() {
    let db = mem_db().await;
    seed_product(&db, "Boots", 120.0, &[("B-1", 2)]).await;

    let repo = ProductRepository::new(db.clone());
    let updated = repo
        .update_by_slug(
            "boots",
            ProductUpdate {
                variants: Some(vec![
                    Variant {
                        size: "M".to_string(),
                        color: "black".to_string(),
                        sku: "B-1".to_string(),
                        stock: 6,
                    },
                    Variant {
                        size: "L".to_string(),
                        color: "black".to_string(),
                        sku: "B-2".to_string(),
                        stock: 4,
                    },
                ]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.total_stock, 10);
}

#[tokio::test]
async fn soft_deleted_products_leave_the_catalog() {
    let db = mem_db().await;
    seed_product(&db, "Old Thing", 5.0, &[("O-1", 1)]).await;

    let repo = ProductRepository::new(db.clone());
    repo.soft_delete_by_slug("old-thing").await.unwrap();

    assert!(repo.find_by_slug("old-thing").await.unwrap().is_none());

    let (listed, total) = repo.find_paginated(&ProductQuery::default()).await.unwrap();
    assert!(listed.iter().all(|p| p.slug != "old-thing"));
    assert_eq!(total, 0);
}
