//! Health DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hookrelay::WebhookSource;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Always `healthy`
    pub status: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl HealthCheck {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: WebhookSource::ALL.iter().map(|s| s.path().to_string()).collect(),
            timestamp: Utc::now(),
        }
    }
}
