//! Vercel Integration for hookrelay
//!
//! Converts Vercel deployment webhooks into Mattermost messages. Both the
//! versioned envelope (`{type, id, createdAt, payload}`) and the older flat
//! payload are accepted; the flat shape is normalized into an envelope first.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookrelay_integration_vercel::VercelTransformer;
//!
//! let message = VercelTransformer::new().transform_value(&raw_json);
//! ```

mod error;
mod event;
mod integration;
mod presentation;
mod providers;
mod render;

pub use error::TransformError;
pub use event::{
    detect_variant, Deployment, DeploymentMeta, EventPayload, EventVariant, LegacyPayload, Links,
    Project, Team, User, VercelEvent,
};
pub use integration::VercelTransformer;
pub use presentation::{presentation_for, Presentation, Priority, ERROR_COLOR};
pub use providers::{GitProvider, Repository};
pub use render::render_event;
