//! Health Routes

use axum::{routing::any, Json, Router};

use crate::models::HealthCheck;
use crate::AppState;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck::healthy())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", any(health_check))
        .route("/health", any(health_check))
}
