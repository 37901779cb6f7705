//! Cart Model
//!
//! One cart per user. `total_items` and `total_price` are derived fields,
//! recomputed on every persist so they are always consistent after a write.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::VariantRef;
use surrealdb::RecordId;

use super::serde_helpers;
use crate::orders::money;

/// One line in a cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Line id, generated at append time
    pub id: String,
    /// Product reference ("product:xxxx")
    pub product: String,
    pub variant: VariantRef,
    pub quantity: i64,
    /// Unit price snapshot taken when the line was added
    pub price: f64,
}

/// Cart entity, unique per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Owning user ("user:xxxx"), unique
    pub user: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_price: f64,
    /// Unix millis
    pub created_at: i64,
    pub updated_at: i64,
}

impl Cart {
    pub fn empty(user: String, now: i64) -> Self {
        Self {
            id: None,
            user,
            items: Vec::new(),
            total_items: 0,
            total_price: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute the derived totals from the current lines.
    ///
    /// Must be called before every persist. The price sum runs on
    /// `Decimal` so float artifacts never reach the stored total.
    pub fn recompute_totals(&mut self) {
        self.total_items = self.items.iter().map(|i| i.quantity).sum();
        let total: Decimal = self
            .items
            .iter()
            .map(|i| money::line_total_decimal(i.price, i.quantity))
            .sum();
        self.total_price = money::to_f64(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: i64, price: f64) -> CartItem {
        CartItem {
            id: id.into(),
            product: "product:p1".into(),
            variant: VariantRef {
                size: "M".into(),
                color: "black".into(),
                sku: format!("SKU-{id}"),
            },
            quantity,
            price,
        }
    }

    #[test]
    fn totals_follow_lines() {
        let mut cart = Cart::empty("user:u1".into(), 0);
        cart.items.push(line("a", 2, 10.0));
        cart.items.push(line("b", 3, 5.5));
        cart.recompute_totals();

        assert_eq!(cart.total_items, 5);
        assert_eq!(cart.total_price, 36.5);

        cart.items.clear();
        cart.recompute_totals();
        assert_eq!(cart.total_items, 0);
        assert_eq!(cart.total_price, 0.0);
    }

    #[test]
    fn totals_are_exact_for_float_hostile_prices() {
        // 0.1 + 0.2 in raw f64 is 0.30000000000000004
        let mut cart = Cart::empty("user:u1".into(), 0);
        cart.items.push(line("a", 1, 0.1));
        cart.items.push(line("b", 1, 0.2));
        cart.recompute_totals();
        assert_eq!(cart.total_price, 0.3);
    }
}
