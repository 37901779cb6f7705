//! Shared application state
//!
//! One [`ServerState`] is built at startup and cloned into every handler.
//! All fields are shallow handles, so cloning is cheap.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    db: Surreal<Db>,
    jwt: Arc<JwtService>,
}

impl ServerState {
    /// Open the on-disk database and build the shared services
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_service = DbService::open(&config.db_path).await?;
        Ok(Self::with_db(config, db_service))
    }

    /// Same wiring on an existing database handle. Tests use this with an
    /// in-memory instance.
    pub fn with_db(config: &Config, db_service: DbService) -> Self {
        Self {
            config: Arc::new(config.clone()),
            db: db_service.db,
            jwt: Arc::new(JwtService::new(config.jwt.clone())),
        }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
