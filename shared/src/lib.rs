//! Shared types for the store server and its API clients
//!
//! # Contents
//!
//! - [`models`] - Request payloads and value types per resource
//! - [`client`] - Authentication DTOs (login, register, user info)
//! - [`response`] - Pagination envelope

pub mod client;
pub mod models;
pub mod response;

// Re-export common types
pub use client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use response::{PageMeta, Paginated};
