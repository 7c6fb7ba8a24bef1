//! Webhook Delivery Port
//!
//! Abstract interface for delivering a transformed message to the
//! destination's incoming-webhook endpoint.

use async_trait::async_trait;

use crate::domain::entities::{MattermostMessage, WebhookDelivery};
use crate::domain::errors::DomainError;

/// Webhook delivery interface
///
/// One attempt per call; implementations apply their own timeout and report
/// a timed-out or refused request as a failed [`WebhookDelivery`], not as an
/// `Err`. `Err` is reserved for failures before anything was sent.
///
/// # Example
///
/// ```rust,ignore
/// use hookrelay::ports::WebhookSender;
///
/// struct HttpSender { /* reqwest client */ }
///
/// #[async_trait]
/// impl WebhookSender for HttpSender {
///     async fn deliver(&self, url: &str, message: &MattermostMessage)
///         -> Result<WebhookDelivery, DomainError>
///     {
///         // POST application/json with a timeout
///     }
/// }
/// ```
#[async_trait]
pub trait WebhookSender: Send + Sync {
    /// Deliver a message to the destination URL
    async fn deliver(
        &self,
        url: &str,
        message: &MattermostMessage,
    ) -> Result<WebhookDelivery, DomainError>;
}

/// Configuration for webhook delivery behavior
#[derive(Debug, Clone)]
pub struct WebhookDeliveryConfig {
    /// Per-request timeout (milliseconds)
    pub timeout_ms: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for WebhookDeliveryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: format!("hookrelay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
