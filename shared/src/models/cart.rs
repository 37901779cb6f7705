//! Cart payloads and value types

use serde::{Deserialize, Serialize};

/// Variant descriptor carried on cart and order lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRef {
    pub size: String,
    pub color: String,
    pub sku: String,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    /// Product id ("product:xxxx")
    pub product: String,
    pub variant: VariantRef,
    pub quantity: i64,
}

/// Change line quantity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i64,
}
