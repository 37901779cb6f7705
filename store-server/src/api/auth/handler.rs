//! Auth API Handlers

use axum::{Json, extract::State};

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, validate_email,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::UserRole;
use shared::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("Password is too long"));
    }
    Ok(())
}

/// POST /api/auth/register - create an account and sign in
///
/// New accounts always get the USER role; admins are provisioned out of band.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<LoginResponse>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let hashed = password::hash_password(&req.password)?;
    let repo = UserRepository::new(state.db().clone());
    let user = repo
        .create(
            req.name,
            req.email.trim().to_lowercase(),
            hashed,
            UserRole::User,
        )
        .await?;

    tracing::info!(email = %user.email, "Account registered");

    let token = state
        .jwt()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        user: user.info(),
    }))
}

/// POST /api/auth/login
///
/// A wrong email and a wrong password produce the same error, so the
/// endpoint cannot be used to probe which accounts exist.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.db().clone());
    let user = repo
        .find_by_email(&req.email.trim().to_lowercase())
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !user.is_active || !password::verify_password(&req.password, &user.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        user: user.info(),
    }))
}

/// GET /api/auth/me - profile of the authenticated user
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    let repo = UserRepository::new(state.db().clone());
    let account = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account"))?;
    Ok(Json(account.info()))
}
