//! Database Module
//!
//! Embedded SurrealDB connection and schema definition.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "store";
const DATABASE: &str = "store";

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `path`
    pub async fn open(path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self { db };
        service.init().await?;
        tracing::info!(path, "Database connection established (SurrealDB RocksDb)");
        Ok(service)
    }

    /// In-memory database, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self { db };
        service.init().await?;
        Ok(service)
    }

    async fn init(&self) -> Result<(), AppError> {
        self.db
            .use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        self.define_schema().await
    }

    /// Apply unique constraints. Idempotent, runs at every startup.
    async fn define_schema(&self) -> Result<(), AppError> {
        self.db
            .query(
                "DEFINE INDEX IF NOT EXISTS idx_user_email ON TABLE user COLUMNS email UNIQUE;
                 DEFINE INDEX IF NOT EXISTS idx_product_slug ON TABLE product COLUMNS slug UNIQUE;
                 DEFINE INDEX IF NOT EXISTS idx_cart_user ON TABLE cart COLUMNS user UNIQUE;
                 DEFINE INDEX IF NOT EXISTS idx_order_number ON TABLE orders COLUMNS order_number UNIQUE;",
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
