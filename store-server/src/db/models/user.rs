//! User Model

use serde::{Deserialize, Serialize};
use shared::models::UserRole;
use shared::UserInfo;
use surrealdb::RecordId;

use super::serde_helpers;

/// User account entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    /// Argon2 hash, never exposed through the API
    pub hashed_password: String,
    pub role: UserRole,
    pub is_active: bool,
    /// Unix millis
    pub created_at: i64,
}

impl User {
    /// Record id as a `user:key` string, empty before the row is persisted
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Public view, safe to return from handlers
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}
