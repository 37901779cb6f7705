//! Health Check Handler

use axum::Json;
use serde::Serialize;

use crate::db::repository::now_millis;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: i64,
}

/// GET /health - liveness probe, no auth
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: now_millis(),
    })
}
