//! Bundled sample payloads
//!
//! Real-world shaped bodies for each source, compiled into the binary so
//! `hookrelay send --sample` works without any files on disk.

use anyhow::{Context, Result};
use serde_json::Value;

use hookrelay::WebhookSource;

/// A named upstream payload
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

impl Sample {
    /// Parse the bundled body
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(self.body)
            .with_context(|| format!("Sample '{}' is not valid JSON", self.name))
    }
}

const fn sample(name: &'static str, description: &'static str, body: &'static str) -> Sample {
    Sample {
        name,
        description,
        body,
    }
}

const DISCORD_SAMPLES: &[Sample] = &[
    sample(
        "simple",
        "Plain content message",
        include_str!("../samples/discord/simple.json"),
    ),
    sample(
        "avatar",
        "Custom username and avatar",
        include_str!("../samples/discord/avatar.json"),
    ),
    sample(
        "rich-embed",
        "Embed with author, fields, image and footer",
        include_str!("../samples/discord/rich-embed.json"),
    ),
    sample(
        "multiple-embeds",
        "Several embeds in one message",
        include_str!("../samples/discord/multiple-embeds.json"),
    ),
    sample(
        "timestamps",
        "Discord <t:...> timestamp tags",
        include_str!("../samples/discord/timestamps.json"),
    ),
    sample(
        "emoji",
        "Emoji inside inline code spans",
        include_str!("../samples/discord/emoji.json"),
    ),
];

const VERCEL_SAMPLES: &[Sample] = &[
    sample(
        "deployment-created",
        "Deployment started",
        include_str!("../samples/vercel/deployment-created.json"),
    ),
    sample(
        "deployment-succeeded",
        "Deployment finished with live URL",
        include_str!("../samples/vercel/deployment-succeeded.json"),
    ),
    sample(
        "deployment-error",
        "Failed build with error message",
        include_str!("../samples/vercel/deployment-error.json"),
    ),
    sample(
        "deployment-canceled",
        "Deployment canceled",
        include_str!("../samples/vercel/deployment-canceled.json"),
    ),
    sample(
        "project-created",
        "Project lifecycle event",
        include_str!("../samples/vercel/project-created.json"),
    ),
    sample(
        "legacy-ready",
        "Flat payload for a ready production deployment",
        include_str!("../samples/vercel/legacy-ready.json"),
    ),
    sample(
        "legacy-error",
        "Flat payload for a failed deployment",
        include_str!("../samples/vercel/legacy-error.json"),
    ),
];

/// All samples for a source
pub fn samples_for(source: WebhookSource) -> &'static [Sample] {
    match source {
        WebhookSource::Discord => DISCORD_SAMPLES,
        WebhookSource::Vercel => VERCEL_SAMPLES,
    }
}

/// Look up a sample by name
pub fn find(source: WebhookSource, name: &str) -> Option<&'static Sample> {
    samples_for(source).iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookrelay::PayloadTransformer;
    use hookrelay_integration_discord::DiscordTransformer;
    use hookrelay_integration_vercel::VercelTransformer;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        for source in WebhookSource::ALL {
            let names: HashSet<_> = samples_for(source).iter().map(|s| s.name).collect();
            assert_eq!(names.len(), samples_for(source).len());
        }
    }

    #[test]
    fn test_discord_samples_transform() {
        let transformer = DiscordTransformer::new();
        for sample in samples_for(WebhookSource::Discord) {
            let message = transformer.transform(&sample.json().unwrap()).unwrap();
            assert!(!message.is_empty(), "{} rendered empty", sample.name);
        }
    }

    #[test]
    fn test_vercel_samples_transform_without_diagnostic() {
        let transformer = VercelTransformer::new();
        for sample in samples_for(WebhookSource::Vercel) {
            let raw = sample.json().unwrap();
            assert!(
                transformer.try_transform(&raw).is_ok(),
                "{} fell back to the diagnostic message",
                sample.name
            );
        }
    }

    #[test]
    fn test_legacy_ready_is_succeeded() {
        let raw = find(WebhookSource::Vercel, "legacy-ready").unwrap().json().unwrap();
        let message = VercelTransformer::new().try_transform(&raw).unwrap();
        let event = message.attachments()[0].field(":label: Event").unwrap();
        assert_eq!(event.value, "deployment.succeeded");
    }

    #[test]
    fn test_find() {
        assert!(find(WebhookSource::Discord, "rich-embed").is_some());
        assert!(find(WebhookSource::Discord, "deployment-error").is_none());
    }
}
