//! PayloadTransformer implementation for Discord

use hookrelay::domain::services::hex_color;
use hookrelay::{
    Attachment, DomainError, Field, MattermostMessage, PayloadTransformer, WebhookSource,
};
use tracing::debug;

use crate::text::process_text;
use crate::webhook::{DiscordWebhook, Embed};

/// Discord → Mattermost transformer
///
/// Stateless; one instance can serve every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscordTransformer;

impl DiscordTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Transform a parsed Discord payload. Never fails.
    pub fn transform_message(&self, payload: &DiscordWebhook) -> MattermostMessage {
        let mut message = MattermostMessage {
            text: process_text(payload.content.as_deref()),
            username: process_text(payload.username.as_deref()),
            icon_url: payload.avatar_url.clone(),
            ..Default::default()
        };

        for embed in payload.embeds.iter().flatten() {
            message.push_attachment(self.transform_embed(embed));
        }

        debug!(
            has_text = message.text.is_some(),
            attachments = message.attachments().len(),
            "Transformed Discord payload"
        );

        message
    }

    /// Convert one embed into one attachment
    fn transform_embed(&self, embed: &Embed) -> Attachment {
        let mut attachment = Attachment {
            color: embed.color.and_then(hex_color),
            title: process_text(embed.title.as_deref()),
            title_link: embed.url.clone(),
            text: process_text(embed.description.as_deref()),
            image_url: embed.image.as_ref().and_then(|i| i.url.clone()),
            thumb_url: embed.thumbnail.as_ref().and_then(|t| t.url.clone()),
            timestamp: embed.timestamp.clone(),
            ..Default::default()
        };

        if let Some(author) = &embed.author {
            attachment.author_name = process_text(author.name.as_deref());
            attachment.author_link = author.url.clone();
            attachment.author_icon = author.icon_url.clone();
        }

        if let Some(footer) = &embed.footer {
            attachment.footer = process_text(footer.text.as_deref());
            attachment.footer_icon = footer.icon_url.clone();
        }

        for field in embed.fields.iter().flatten() {
            attachment.push_field(Field::new(
                process_text(field.name.as_deref()).unwrap_or_default(),
                process_text(field.value.as_deref()).unwrap_or_default(),
                field.inline.unwrap_or(false),
            ));
        }

        attachment
    }
}

impl PayloadTransformer for DiscordTransformer {
    fn source(&self) -> WebhookSource {
        WebhookSource::Discord
    }

    fn transform(&self, raw: &serde_json::Value) -> Result<MattermostMessage, DomainError> {
        if !raw.is_object() {
            return Err(DomainError::invalid_payload(
                "Discord",
                "expected a JSON object",
            ));
        }

        let payload: DiscordWebhook = serde_json::from_value(raw.clone())
            .map_err(|e| DomainError::invalid_payload("Discord", e))?;

        Ok(self.transform_message(&payload))
    }
}
