//! Payload Transformer Port
//!
//! Abstract interface for turning an upstream webhook body into the
//! destination message schema.
//!
//! Implementations live in separate crates
//! (e.g., hookrelay-integration-discord, hookrelay-integration-vercel).

use crate::domain::entities::MattermostMessage;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::WebhookSource;

/// Upstream → destination transformation
///
/// Transformers are pure: no I/O, no shared mutable state. One instance is
/// shared across all requests.
///
/// # Example
///
/// ```rust,ignore
/// use hookrelay::ports::PayloadTransformer;
///
/// struct EchoTransformer;
///
/// impl PayloadTransformer for EchoTransformer {
///     fn source(&self) -> WebhookSource { WebhookSource::Discord }
///     fn transform(&self, raw: &serde_json::Value) -> Result<MattermostMessage, DomainError> {
///         Ok(MattermostMessage::new().with_text(raw.to_string()))
///     }
/// }
/// ```
pub trait PayloadTransformer: Send + Sync {
    /// Which upstream producer this transformer understands
    fn source(&self) -> WebhookSource;

    /// Transform a parsed upstream body
    ///
    /// Returns `DomainError::Validation` only when the body cannot be read as
    /// this source's payload at all. Missing or malformed optional fields
    /// never produce an error.
    fn transform(&self, raw: &serde_json::Value) -> Result<MattermostMessage, DomainError>;
}
