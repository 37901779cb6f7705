//! Store Server - e-commerce backend
//!
//! # Architecture
//!
//! - **Database** (`db`): embedded SurrealDB storage, repositories per table
//! - **Auth** (`auth`): JWT + Argon2 authentication
//! - **Orders** (`orders`): placement workflow, totals, status transitions
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module layout
//!
//! ```text
//! store-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT, passwords, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # order domain logic
//! ├── db/            # models and repositories
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorBody};

pub use utils::logger::{init_logger, init_logger_with_file};
