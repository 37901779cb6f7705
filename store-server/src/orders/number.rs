//! Order number generation
//!
//! `ORD{millis}{seq}`: a timestamp component for human reference plus an
//! atomic counter sequence for global uniqueness. Two placements in the same
//! millisecond still get distinct numbers because the sequence never repeats.

use crate::db::repository::{OrderRepository, RepoResult, now_millis};

pub fn format_order_number(millis: i64, seq: u64) -> String {
    format!("ORD{millis}{seq}")
}

/// Generate the next globally unique order number
pub async fn generate(orders: &OrderRepository) -> RepoResult<String> {
    let seq = orders.next_sequence().await?;
    Ok(format_order_number(now_millis(), seq))
}
