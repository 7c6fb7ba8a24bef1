//! hookrelay Domain Library
//!
//! Core domain types and interfaces for the hookrelay webhook bridge.
//!
//! # Architecture
//!
//! This crate follows the same Hexagonal layout as the rest of the workspace:
//!
//! - **Domain Layer** (`domain/`): Pure types and helpers
//!   - `entities/`: Destination message schema and delivery records
//!   - `value_objects/`: Immutable value types (WebhookSource, DateStyle)
//!   - `services/`: Shared formatting helpers (colors, truncation, dates)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `transformer`: Upstream payload → destination message
//!   - `webhook`: Outbound delivery
//!   - `clock`: Injectable source of "now"
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookrelay::{MattermostMessage, PayloadTransformer, WebhookSender};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    lenient, Action, Attachment, DateStyle, DeliveryStatus, DomainError, Field,
    MattermostMessage, WebhookDelivery, WebhookSource,
};
pub use ports::{
    Clock, FixedClock, PayloadTransformer, SystemClock, WebhookDeliveryConfig, WebhookSender,
};
