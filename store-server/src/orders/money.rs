//! Money arithmetic using rust_decimal for precision
//!
//! All monetary calculations are done using `Decimal` internally, then
//! converted to `f64` for storage/serialization, rounded to 2 decimal
//! places (half-up).

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a monetary value to 2 decimal places, half-up
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total: unit_price * quantity, rounded
pub fn line_total_decimal(unit_price: f64, quantity: i64) -> Decimal {
    round2(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Line total as f64 for storage
pub fn line_total(unit_price: f64, quantity: i64) -> f64 {
    to_f64(line_total_decimal(unit_price, quantity))
}
