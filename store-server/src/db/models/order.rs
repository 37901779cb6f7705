//! Order Model
//!
//! An order is an immutable snapshot of purchased items and computed totals,
//! created once at placement. Only its status, payment and tracking fields
//! mutate afterwards; it is never deleted.

use serde::{Deserialize, Serialize};
use shared::models::{OrderStatus, PaymentMethod, PaymentStatus, ShippingAddress, VariantRef};
use surrealdb::RecordId;

use super::serde_helpers;

/// Immutable order line, snapshotted from a cart line at placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product reference ("product:xxxx")
    pub product: String,
    pub variant: VariantRef,
    pub quantity: i64,
    /// Unit price at placement time
    pub price: f64,
    /// Line total: price × quantity
    pub total: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Globally unique, human-referenceable number
    pub order_number: String,
    /// Owning user ("user:xxxx")
    pub user: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub tax: f64,
    /// subtotal + shipping_cost + tax, frozen at creation
    pub total: f64,
    pub notes: Option<String>,
    pub tracking_number: Option<String>,
    /// Unix millis
    pub estimated_delivery: Option<i64>,
    pub delivered_at: Option<i64>,
    pub created_at: i64,
}
