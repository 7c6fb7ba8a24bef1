//! Relay Configuration
//!
//! Read once at start-up from the environment (after `.env` is loaded).
//! Transformers never see this; only the router and the sender do.

use anyhow::{Context, Result};
use hookrelay::WebhookDeliveryConfig;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Destination used when a request carries no `?url=`
    pub default_webhook_url: Option<String>,
    pub log_level: String,
    /// Log inbound and transformed payloads at debug level
    pub log_payloads: bool,
    pub request_timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            default_webhook_url: None,
            log_level: "info".to_string(),
            log_payloads: false,
            request_timeout_ms: 10_000,
        }
    }
}

impl RelayConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };

        let request_timeout_ms = match get("REQUEST_TIMEOUT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("REQUEST_TIMEOUT must be milliseconds, got {raw:?}"))?,
            None => defaults.request_timeout_ms,
        };

        let log_payloads = get("LOG_PAYLOADS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(defaults.log_payloads);

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            default_webhook_url: get("MATTERMOST_WEBHOOK_URL")
                .or_else(|| get("DEFAULT_MATTERMOST_WEBHOOK_URL")),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_payloads,
            request_timeout_ms,
        })
    }

    /// Sender settings derived from this configuration
    pub fn delivery_config(&self) -> WebhookDeliveryConfig {
        WebhookDeliveryConfig {
            timeout_ms: self.request_timeout_ms,
            ..Default::default()
        }
    }
}
