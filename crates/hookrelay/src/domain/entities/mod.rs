//! Domain Entities
//!
//! - MattermostMessage: Destination payload (attachments, fields, actions)
//! - WebhookDelivery: Outcome of a forward attempt

mod delivery;
mod mattermost;

pub use delivery::*;
pub use mattermost::*;
