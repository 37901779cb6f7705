//! Utility module - common helpers and types
//!
//! # Contents
//!
//! - [`AppError`] - application error type
//! - [`AppResult`] - handler result alias
//! - validation and logging helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, ErrorBody};
pub use result::AppResult;
