//! Discord Integration for hookrelay
//!
//! Converts Discord-style execute-webhook payloads (content + embeds) into
//! Mattermost incoming-webhook messages (text + attachments).
//!
//! # Usage
//!
//! ```rust,ignore
//! use hookrelay_integration_discord::{DiscordTransformer, DiscordWebhook};
//!
//! let payload: DiscordWebhook = serde_json::from_str(body)?;
//! let message = DiscordTransformer::new().transform_message(&payload);
//! ```

mod integration;
mod text;
mod webhook;

pub use integration::DiscordTransformer;
pub use text::{process_text, render_timestamp_tags, unwrap_emoji_code_spans};
pub use webhook::{DiscordWebhook, Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia};
