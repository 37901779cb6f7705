//! User Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, now_millis, record_id};
use crate::db::models::User;
use shared::models::UserRole;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new account. Email uniqueness is enforced here and by the
    /// unique index.
    pub async fn create(
        &self,
        name: String,
        email: String,
        hashed_password: String,
        role: UserRole,
    ) -> RepoResult<User> {
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Conflict(format!(
                "User with email {email} already exists"
            )));
        }

        let user = User {
            id: None,
            name,
            email: email.clone(),
            hashed_password,
            role,
            is_active: true,
            created_at: now_millis(),
        };

        let created: Option<User> = self
            .base
            .db()
            .create(USER_TABLE)
            .content(user)
            .await
            .map_err(|e| {
                // Lost the pre-check race against a concurrent register
                if e.to_string().contains("already contains") {
                    RepoError::Conflict(format!("User with email {email} already exists"))
                } else {
                    RepoError::from(e)
                }
            })?;

        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let rid = record_id(USER_TABLE, id)?;
        let user: Option<User> = self.base.db().select(rid).await?;
        Ok(user)
    }
}
