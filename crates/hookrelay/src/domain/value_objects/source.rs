//! WebhookSource - Upstream producers the relay understands

use serde::{Deserialize, Serialize};

/// Upstream webhook producer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WebhookSource {
    Discord,
    Vercel,
}

impl WebhookSource {
    pub const ALL: [WebhookSource; 2] = [WebhookSource::Discord, WebhookSource::Vercel];

    /// Route path for this source (`/discord`, `/vercel`)
    pub fn path(&self) -> &'static str {
        match self {
            WebhookSource::Discord => "/discord",
            WebhookSource::Vercel => "/vercel",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            WebhookSource::Discord => "Discord",
            WebhookSource::Vercel => "Vercel",
        }
    }
}

impl std::fmt::Display for WebhookSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookSource::Discord => write!(f, "discord"),
            WebhookSource::Vercel => write!(f, "vercel"),
        }
    }
}

impl std::str::FromStr for WebhookSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discord" => Ok(WebhookSource::Discord),
            "vercel" => Ok(WebhookSource::Vercel),
            _ => Err(format!("Unknown webhook source: {}", s)),
        }
    }
}
