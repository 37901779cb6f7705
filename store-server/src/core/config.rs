//! Server configuration
//!
//! All settings come from environment variables with development defaults,
//! loaded once at startup and carried immutably in [`crate::core::ServerState`].

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// RocksDB directory for the embedded database
    pub db_path: String,
    pub log_dir: String,
    pub jwt: JwtConfig,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "data/store.db".into()),
            log_dir: std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
