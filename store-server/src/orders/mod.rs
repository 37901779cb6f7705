//! Order domain logic
//!
//! The placement workflow, status transition handler, total computation and
//! order-number generation. HTTP handlers in `api::orders` call into this
//! module; persistence goes through `db::repository`.

pub mod money;
pub mod number;
pub mod placement;
pub mod totals;
pub mod transition;

pub use placement::place_order;
pub use transition::apply_status_update;
