//! Order total computation
//!
//! Computed once at placement and frozen on the order thereafter. All
//! arithmetic runs on `Decimal`; the stored fields are rounded f64.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::orders::money::{round2, to_decimal, to_f64};

/// Free shipping above this subtotal, in currency units
pub const FREE_SHIPPING_THRESHOLD: f64 = 1000.0;

/// Flat shipping fee below the threshold
pub const FLAT_SHIPPING_FEE: f64 = 100.0;

/// Tax is a flat 10% of the subtotal
pub const TAX_RATE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub tax: f64,
    pub total: f64,
}

/// total = subtotal + shipping + tax
///
/// Each component is rounded before the final sum, so the stored fields
/// always add up exactly.
pub fn compute(subtotal: f64) -> OrderTotals {
    let subtotal_d = round2(to_decimal(subtotal));
    let shipping_d = if subtotal_d > to_decimal(FREE_SHIPPING_THRESHOLD) {
        Decimal::ZERO
    } else {
        to_decimal(FLAT_SHIPPING_FEE)
    };
    let tax_d = round2(subtotal_d * to_decimal(TAX_RATE));

    OrderTotals {
        subtotal: to_f64(subtotal_d),
        shipping_cost: to_f64(shipping_d),
        tax: to_f64(tax_d),
        total: to_f64(subtotal_d + shipping_d + tax_d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_shipping_above_threshold() {
        let totals = compute(1200.0);
        assert_eq!(totals.shipping_cost, 0.0);
        assert_eq!(totals.tax, 120.0);
        assert_eq!(totals.total, 1320.0);
    }

    #[test]
    fn flat_fee_below_threshold() {
        let totals = compute(500.0);
        assert_eq!(totals.shipping_cost, 100.0);
        assert_eq!(totals.tax, 50.0);
        assert_eq!(totals.total, 650.0);
    }

    #[test]
    fn threshold_is_exclusive() {
        // Exactly at the threshold still pays the flat fee
        let totals = compute(1000.0);
        assert_eq!(totals.shipping_cost, 100.0);
        assert_eq!(totals.total, 1200.0);
    }

    #[test]
    fn tax_is_ten_percent_of_subtotal() {
        for (subtotal, tax) in [
            (0.0, 0.0),
            (1.0, 0.1),
            (99.9, 9.99),
            (1000.0, 100.0),
            (12345.6, 1234.56),
        ] {
            let totals = compute(subtotal);
            assert_eq!(totals.tax, tax);
        }
    }

    #[test]
    fn components_sum_exactly_to_the_total() {
        for subtotal in [0.1, 99.99, 123.45, 1000.01] {
            let totals = compute(subtotal);
            let sum = to_decimal(totals.subtotal)
                + to_decimal(totals.shipping_cost)
                + to_decimal(totals.tax);
            assert_eq!(to_f64(sum), totals.total);
        }
    }
}
