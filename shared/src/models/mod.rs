//! Request payloads and value types
//!
//! Shared between store-server and API clients. Entity rows returned by the
//! server live in `store-server/src/db/models`; this module only carries the
//! payload and value types both sides need.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

// Re-exports
pub use cart::*;
pub use order::*;
pub use product::*;
pub use user::*;
