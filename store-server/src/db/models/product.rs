//! Product Model
//!
//! A product carries its variants embedded; `total_stock` is a cached sum
//! of variant stocks and is co-mutated with every variant write.

use serde::{Deserialize, Serialize};
use shared::models::Variant;
use surrealdb::RecordId;

use super::serde_helpers;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    /// Unique, url-safe identity
    pub slug: String,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub price: f64,
    pub compare_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Cached sum of variant stocks
    #[serde(default)]
    pub total_stock: i64,
    #[serde(default)]
    pub ratings: f64,
    #[serde(default)]
    pub num_reviews: i64,
    /// Unix millis
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Sum of current variant stocks
    pub fn summed_stock(&self) -> i64 {
        self.variants.iter().map(|v| v.stock).sum()
    }

    pub fn variant(&self, sku: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.sku == sku)
    }
}
