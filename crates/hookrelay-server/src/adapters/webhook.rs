//! HTTP Webhook Implementation
//!
//! Delivers transformed messages to Mattermost using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use hookrelay::{
    DomainError, MattermostMessage, WebhookDelivery, WebhookDeliveryConfig, WebhookSender,
};

use crate::telemetry::short_url;

/// HTTP implementation of WebhookSender
pub struct HttpWebhookSender {
    client: Client,
    config: WebhookDeliveryConfig,
}

impl HttpWebhookSender {
    pub fn new() -> Result<Self, DomainError> {
        Self::with_config(WebhookDeliveryConfig::default())
    }

    pub fn with_config(config: WebhookDeliveryConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| DomainError::ExternalService(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WebhookDeliveryConfig {
        &self.config
    }
}

#[async_trait]
impl WebhookSender for HttpWebhookSender {
    async fn deliver(
        &self,
        url: &str,
        message: &MattermostMessage,
    ) -> Result<WebhookDelivery, DomainError> {
        let delivery = WebhookDelivery::new();

        // Serialize payload
        let body = serde_json::to_vec(message).map_err(|e| {
            DomainError::Serialization(format!("Failed to serialize message: {e}"))
        })?;

        debug!(
            delivery_id = %delivery.id,
            url = %short_url(url),
            bytes = body.len(),
            "Posting to destination"
        );

        // Send request
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await;

        let delivery = match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let response_body = resp.text().await.ok();

                if (200..300).contains(&status_code) {
                    delivery.success(status_code, response_body)
                } else {
                    warn!(
                        delivery_id = %delivery.id,
                        status = status_code,
                        "Destination rejected message"
                    );
                    delivery.failed(
                        Some(status_code),
                        response_body.unwrap_or_else(|| "No response body".to_string()),
                    )
                }
            }
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!("timed out after {}ms", self.config.timeout_ms)
                } else {
                    e.to_string()
                };
                warn!(delivery_id = %delivery.id, error = %reason, "Destination unreachable");
                delivery.failed(None, reason)
            }
        };

        Ok(delivery)
    }
}
