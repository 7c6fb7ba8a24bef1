//! Bridge DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use hookrelay::WebhookDelivery;

/// Destination override carried in the query string
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WebhookQuery {
    /// Mattermost incoming-webhook URL
    pub url: Option<String>,
    /// Alias of `url`
    pub webhook_url: Option<String>,
}

impl WebhookQuery {
    /// `?url=`, then `?webhook_url=`, then `default`; empty values are skipped
    pub fn resolve(&self, default: Option<&str>) -> Option<String> {
        [self.url.as_deref(), self.webhook_url.as_deref(), default]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
            .map(str::to_string)
    }
}

/// Result of relaying a webhook
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BridgeResponse {
    pub success: bool,
    pub message: String,
    /// HTTP status returned alongside this body
    pub status: u16,
    /// Correlates with the server logs
    pub delivery_id: Uuid,
}

impl BridgeResponse {
    pub fn from_delivery(delivery: &WebhookDelivery) -> Self {
        let detail = delivery.response_body.as_deref().unwrap_or_default();

        let (success, message, status) = match (delivery.is_success(), delivery.status_code) {
            (true, _) => (true, "Notification sent successfully".to_string(), 200),
            (false, Some(code)) => (
                false,
                format!("Failed to send notification: {} {}", code, detail),
                502,
            ),
            (false, None) => (
                false,
                format!("Error sending notification: {}", detail),
                502,
            ),
        };

        Self {
            success,
            message,
            status,
            delivery_id: delivery.id,
        }
    }
}
