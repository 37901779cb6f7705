//! Product payloads and value types

use serde::{Deserialize, Serialize};

/// A purchasable configuration of a product, identified by a unique SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub size: String,
    pub color: String,
    pub sku: String,
    /// Available units, never negative
    pub stock: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    /// Derived from `name` when absent
    pub slug: Option<String>,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    /// Unit price in currency units
    pub price: f64,
    pub compare_price: Option<f64>,
    pub images: Vec<String>,
    pub variants: Vec<Variant>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
}

/// Update product payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub compare_price: Option<f64>,
    pub images: Option<Vec<String>>,
    pub variants: Option<Vec<Variant>>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// Catalog list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Derive a url-safe slug from a product name
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_dash = true; // suppress leading dashes
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Classic Cotton T-Shirt"), "classic-cotton-t-shirt");
        assert_eq!(slugify("  Denim  Jacket! "), "denim-jacket");
        assert_eq!(slugify("Hoodie 2.0"), "hoodie-2-0");
    }
}
