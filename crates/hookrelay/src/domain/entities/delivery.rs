//! WebhookDelivery - Outcome of one forward attempt
//!
//! The relay makes exactly one attempt per inbound request; this record
//! describes how that attempt went so the router can report it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a webhook delivery attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookDelivery {
    /// Unique ID for this delivery (used for log correlation)
    pub id: Uuid,
    pub status: DeliveryStatus,
    /// HTTP status returned by the destination, if it answered at all
    pub status_code: Option<u16>,
    /// Destination response body, or the transport error message
    pub response_body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Success,
    Failed,
}

impl WebhookDelivery {
    /// Create a new pending delivery
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: DeliveryStatus::Pending,
            status_code: None,
            response_body: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Mark as successful
    pub fn success(mut self, status_code: u16, response_body: Option<String>) -> Self {
        self.status = DeliveryStatus::Success;
        self.status_code = Some(status_code);
        self.response_body = response_body;
        self.completed_at = Some(Utc::now());
        self
    }

    /// Mark as failed
    pub fn failed(mut self, status_code: Option<u16>, error: String) -> Self {
        self.status = DeliveryStatus::Failed;
        self.status_code = status_code;
        self.response_body = Some(error);
        self.completed_at = Some(Utc::now());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == DeliveryStatus::Success
    }
}

impl Default for WebhookDelivery {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
