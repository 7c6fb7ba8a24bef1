//! hookrelay API Routes
//!
//! - POST /discord - Discord webhook → Mattermost
//! - POST /vercel - Vercel webhook → Mattermost
//! - GET /health, / - Liveness
//! - /swagger-ui - API documentation

pub mod health;
pub mod swagger;
pub mod webhook;

use crate::error::ApiError;

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
