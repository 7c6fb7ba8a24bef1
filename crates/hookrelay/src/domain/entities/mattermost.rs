//! Mattermost Message Entity
//!
//! The payload schema accepted by a Mattermost incoming webhook. Every
//! field is optional and absent fields are omitted from the serialized JSON.

use serde::{Deserialize, Serialize};

/// Incoming-webhook payload sent to the destination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MattermostMessage {
    /// Top-level message text (also the plain-text rendering for notifications)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Display name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Rich attachments, rendered in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// A rich card inside a message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Sidebar color as `#rrggbb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
    /// ISO-8601 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
}

/// A title/value pair shown in an attachment's field grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    /// Whether the field may share a row with its neighbour
    #[serde(default)]
    pub short: bool,
}

/// A button rendered under an attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `primary`, `danger`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl MattermostMessage {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    /// Append an attachment
    pub fn push_attachment(&mut self, attachment: Attachment) {
        self.attachments.get_or_insert_with(Vec::new).push(attachment);
    }

    /// Attachments as a slice (empty when absent)
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }

    /// True when the message would render nothing
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.attachments().is_empty()
    }
}

impl Attachment {
    /// Append a field, keeping insertion order
    pub fn push_field(&mut self, field: Field) {
        self.fields.get_or_insert_with(Vec::new).push(field);
    }

    /// Append an action button
    pub fn push_action(&mut self, action: Action) {
        self.actions.get_or_insert_with(Vec::new).push(action);
    }

    /// Fields as a slice (empty when absent)
    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Actions as a slice (empty when absent)
    pub fn actions(&self) -> &[Action] {
        self.actions.as_deref().unwrap_or_default()
    }

    /// Find a field by its exact title
    pub fn field(&self, title: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.title == title)
    }
}

impl Field {
    pub fn new(title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short,
        }
    }
}

impl Action {
    /// Create a link button
    pub fn button(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: "button".to_string(),
            text: text.into(),
            url: Some(url.into()),
            style: None,
        }
    }

    /// Set the button style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}
