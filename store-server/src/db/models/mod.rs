//! Database entity models
//!
//! Rows stored in and returned from SurrealDB. Record ids serialize as
//! "table:id" strings in API responses; cross-table references are stored
//! as plain "table:id" strings.

pub mod cart;
pub mod order;
pub mod product;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use cart::{Cart, CartItem};
pub use order::{Order, OrderItem};
pub use product::Product;
pub use user::User;
