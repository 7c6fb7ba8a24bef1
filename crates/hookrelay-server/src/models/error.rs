//! Error DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hookrelay::WebhookSource;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Only on 404
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn available_endpoints() -> Vec<String> {
        WebhookSource::ALL
            .iter()
            .map(|s| format!("{}?url=<mattermost_webhook_url>", s.path()))
            .chain(std::iter::once("/health".to_string()))
            .collect()
    }
}
