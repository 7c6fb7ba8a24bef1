//! hookrelay API Client

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use hookrelay::WebhookSource;

/// API Client for a running relay
pub struct RelayClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct BridgeResponse {
    pub success: bool,
    pub message: String,
    pub status: u16,
    pub delivery_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// What the relay did with a sent payload
#[derive(Debug)]
pub enum SendOutcome {
    /// The relay forwarded it; `success` says whether Mattermost accepted it
    Relayed(BridgeResponse),
    /// The relay refused it before forwarding
    Rejected { status: u16, error: String },
}

impl RelayClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint for `source`, with the destination as `?url=` when given
    pub fn webhook_endpoint(&self, source: WebhookSource, webhook_url: Option<&str>) -> String {
        let endpoint = format!("{}{}", self.base_url, source.path());
        match webhook_url {
            Some(url) => format!("{}?url={}", endpoint, urlencoding::encode(url)),
            None => endpoint,
        }
    }

    /// Health check
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to hookrelay")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let health: HealthResponse = resp.json().await.context("Failed to parse response")?;

        Ok(health)
    }

    /// POST a raw upstream payload to the relay
    pub async fn send(
        &self,
        source: WebhookSource,
        payload: &Value,
        webhook_url: Option<&str>,
    ) -> Result<SendOutcome> {
        let url = self.webhook_endpoint(source, webhook_url);
        let resp = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .context("Failed to connect to hookrelay")?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        if let Ok(bridge) = serde_json::from_str::<BridgeResponse>(&body) {
            return Ok(SendOutcome::Relayed(bridge));
        }

        let error = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);

        Ok(SendOutcome::Rejected { status, error })
    }
}
