//! Shared test fixtures: in-memory database plus seed helpers.

#![allow(dead_code)]

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{
    PaymentMethod, PlaceOrderRequest, ProductCreate, ShippingAddress, UserRole, Variant,
    VariantRef,
};
use store_server::db::DbService;
use store_server::db::models::{Product, User};
use store_server::db::repository::{ProductRepository, UserRepository};

pub async fn mem_db() -> Surreal<Db> {
    DbService::memory().await.expect("in-memory db").db
}

pub async fn seed_user(db: &Surreal<Db>, email: &str) -> User {
    UserRepository::new(db.clone())
        .create(
            "Test User".to_string(),
            email.to_string(),
            "not-a-real-hash".to_string(),
            UserRole::User,
        )
        .await
        .expect("seed user")
}

/// Create a product with one variant per (sku, stock) pair, priced uniformly
pub async fn seed_product(
    db: &Surreal<Db>,
    name: &str,
    price: f64,
    variants: &[(&str, i64)],
) -> Product {
    let variants = variants
        .iter()
        .map(|(sku, stock)| Variant {
            size: "M".to_string(),
            color: "black".to_string(),
            sku: sku.to_string(),
            stock: *stock,
        })
        .collect();

    ProductRepository::new(db.clone())
        .create(ProductCreate {
            name: name.to_string(),
            slug: None,
            description: "Test product".to_string(),
            category: "apparel".to_string(),
            subcategory: None,
            brand: None,
            price,
            compare_price: None,
            images: vec![],
            variants,
            tags: None,
            featured: None,
        })
        .await
        .expect("seed product")
}

pub fn variant_ref(sku: &str) -> VariantRef {
    VariantRef {
        size: "M".to_string(),
        color: "black".to_string(),
        sku: sku.to_string(),
    }
}

pub fn place_request() -> PlaceOrderRequest {
    PlaceOrderRequest {
        shipping_address: ShippingAddress {
            full_name: "Test User".to_string(),
            phone: "555-0100".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "US".to_string(),
            zip_code: "62701".to_string(),
        },
        payment_method: PaymentMethod::CashOnDelivery,
        notes: None,
    }
}

/// Stock of one variant, read back fresh from the database
pub async fn stock_of(db: &Surreal<Db>, product: &Product, sku: &str) -> i64 {
    let id = product.id.as_ref().expect("product id").to_string();
    let fresh = ProductRepository::new(db.clone())
        .find_by_id(&id)
        .await
        .expect("reload product")
        .expect("product exists");
    fresh.variant(sku).expect("variant exists").stock
}
