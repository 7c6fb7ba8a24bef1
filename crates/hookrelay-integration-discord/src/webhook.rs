//! Discord webhook payload types
//!
//! Every field is optional and deserialized leniently: a sub-field with the
//! wrong JSON type is dropped, the rest of the payload survives.

use hookrelay::lenient;
use serde::Deserialize;

/// Body of a Discord execute-webhook request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscordWebhook {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_vec")]
    pub embeds: Option<Vec<Embed>>,
}

/// Rich embed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embed {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub url: Option<String>,
    /// Decimal 24-bit RGB
    #[serde(default, deserialize_with = "lenient::optional")]
    pub color: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub image: Option<EmbedMedia>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, deserialize_with = "lenient::optional_vec")]
    pub fields: Option<Vec<EmbedField>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbedFooter {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub icon_url: Option<String>,
}

/// Image or thumbnail
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbedMedia {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbedAuthor {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbedField {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub inline: Option<bool>,
}
