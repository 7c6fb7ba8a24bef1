//! PayloadTransformer implementation for Vercel

use std::fmt;
use std::sync::Arc;

use hookrelay::{
    Attachment, Clock, DomainError, MattermostMessage, PayloadTransformer, SystemClock,
    WebhookSource,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TransformError;
use crate::event::detect_variant;
use crate::presentation::{presentation_for, Priority, ERROR_COLOR};
use crate::render::{render_event, VERCEL_ICON_URL, VERCEL_USERNAME};

const ERROR_TITLE: &str = ":warning: Vercel Webhook Processing Error";
const ERROR_TEXT: &str = ":warning: Vercel webhook could not be processed";

/// Vercel → Mattermost transformer
///
/// The clock only supplies `createdAt` for legacy payloads that lack one;
/// tests inject a [`hookrelay::FixedClock`].
#[derive(Clone)]
pub struct VercelTransformer {
    clock: Arc<dyn Clock>,
}

impl VercelTransformer {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Transform raw JSON. Never fails: errors produce a diagnostic message.
    pub fn transform_value(&self, raw: &Value) -> MattermostMessage {
        match self.try_transform(raw) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "⚠️ Vercel payload could not be transformed");
                error_message(raw, &e)
            }
        }
    }

    /// The fallible core of [`Self::transform_value`]
    pub fn try_transform(&self, raw: &Value) -> Result<MattermostMessage, TransformError> {
        let variant = detect_variant(raw)?;
        let legacy = variant.is_legacy();
        let event = variant.normalize(self.clock.as_ref())?;

        let presentation = presentation_for(&event.event_type);
        if presentation.priority == Priority::High {
            warn!(
                event_type = %event.event_type,
                project = event.project_name().unwrap_or("-"),
                "🚨 High-priority Vercel event"
            );
        } else {
            debug!(
                event_type = %event.event_type,
                priority = %presentation.priority,
                legacy,
                "Transforming Vercel event"
            );
        }

        Ok(render_event(&event))
    }
}

impl Default for VercelTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VercelTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VercelTransformer").finish_non_exhaustive()
    }
}

impl PayloadTransformer for VercelTransformer {
    fn source(&self) -> WebhookSource {
        WebhookSource::Vercel
    }

    fn transform(&self, raw: &Value) -> Result<MattermostMessage, DomainError> {
        Ok(self.transform_value(raw))
    }
}

/// Diagnostic message carrying the raw input
fn error_message(raw: &Value, error: &TransformError) -> MattermostMessage {
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());

    let attachment = Attachment {
        fallback: Some(pretty),
        color: Some(ERROR_COLOR.to_string()),
        title: Some(ERROR_TITLE.to_string()),
        text: Some(format!("Failed to process webhook: {}", error)),
        footer: Some(VERCEL_USERNAME.to_string()),
        footer_icon: Some(VERCEL_ICON_URL.to_string()),
        ..Default::default()
    };

    let mut message = MattermostMessage::new()
        .with_text(ERROR_TEXT)
        .with_username(VERCEL_USERNAME)
        .with_icon_url(VERCEL_ICON_URL);
    message.push_attachment(attachment);
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::*;
    use hookrelay::{Action, FixedClock};
    use serde_json::json;

    fn transformer() -> VercelTransformer {
        VercelTransformer::with_clock(Arc::new(FixedClock::from_millis(1_704_067_200_000)))
    }

    fn transform(raw: Value) -> MattermostMessage {
        transformer().transform_value(&raw)
    }

    fn succeeded_event() -> Value {
        json!({
            "type": "deployment.succeeded",
            "id": "evt_123",
            "createdAt": 1704067200000_i64,
            "payload": {
                "region": "iad1",
                "team": { "id": "team_1", "name": "Acme" },
                "user": { "id": "user_1", "username": "jdoe" },
                "project": { "id": "prj_1", "name": "web" },
                "target": "production",
                "deployment": {
                    "id": "dpl_1",
                    "url": "web-abc123.vercel.app",
                    "inspectorUrl": "https://vercel.com/acme/web/inspect",
                    "source": "git",
                    "buildingAt": 1704067200000_i64,
                    "ready": 1704067265000_i64,
                    "meta": {
                        "githubCommitAuthorLogin": "jdoe",
                        "githubCommitAuthorName": "Jane Doe",
                        "githubCommitSha": "abc123def4567890",
                        "githubCommitMessage": "Add pricing page",
                        "githubCommitRef": "main",
                        "githubCommitOrg": "acme",
                        "githubCommitRepo": "web"
                    }
                },
                "links": {
                    "deployment": "https://vercel.com/acme/web/dpl_1",
                    "project": "https://vercel.com/acme/web"
                },
                "regions": ["iad1", "sfo1"]
            }
        })
    }

    #[test]
    fn test_succeeded_envelope() {
        let message = transform(succeeded_event());

        assert_eq!(message.username.as_deref(), Some("Vercel"));
        assert_eq!(message.icon_url.as_deref(), Some(VERCEL_ICON_URL));
        assert_eq!(
            message.text.as_deref(),
            Some(":white_check_mark: Deployment Succeeded for web (Production) - https://web-abc123.vercel.app\n> Add pricing page by jdoe")
        );

        let a = &message.attachments()[0];
        assert_eq!(a.color.as_deref(), Some("#0f9549"));
        assert_eq!(a.title.as_deref(), Some(":white_check_mark: Deployment Succeeded"));
        assert_eq!(a.fallback.as_deref(), Some("Deployment Succeeded for web"));
        assert_eq!(a.title_link.as_deref(), Some("https://vercel.com/acme/web/dpl_1"));
        assert_eq!(a.footer.as_deref(), Some("Vercel"));
        assert_eq!(a.timestamp.as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(a.text, None);
    }

    #[test]
    fn test_field_order_and_values() {
        let message = transform(succeeded_event());
        let a = &message.attachments()[0];

        let titles: Vec<_> = a.fields().iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                FIELD_PROJECT,
                FIELD_ENVIRONMENT,
                FIELD_LIVE_URL,
                FIELD_BRANCH,
                FIELD_AUTHOR,
                FIELD_COMMIT,
                FIELD_MESSAGE,
                FIELD_REPOSITORY,
                FIELD_SOURCE,
                FIELD_TEAM,
                FIELD_CREATED,
                FIELD_BUILD_TIME,
                FIELD_REGIONS,
                FIELD_EVENT,
                FIELD_REGION,
            ]
        );

        let value = |title: &str| a.field(title).map(|f| f.value.as_str());
        assert_eq!(value(FIELD_ENVIRONMENT), Some("Production"));
        assert_eq!(
            value(FIELD_LIVE_URL),
            Some("[web-abc123.vercel.app](https://web-abc123.vercel.app)")
        );
        assert_eq!(
            value(FIELD_COMMIT),
            Some("[`abc123d`](https://github.com/acme/web/commit/abc123def4567890)")
        );
        assert_eq!(value(FIELD_REPOSITORY), Some("[acme/web](https://github.com/acme/web)"));
        assert_eq!(value(FIELD_SOURCE), Some("GIT"));
        assert_eq!(value(FIELD_TEAM), Some("Acme"));
        assert_eq!(value(FIELD_CREATED), Some("January 1, 2024 12:00 AM UTC"));
        assert_eq!(value(FIELD_BUILD_TIME), Some("1m5s"));
        assert_eq!(value(FIELD_REGIONS), Some("IAD1, SFO1"));
        assert_eq!(value(FIELD_EVENT), Some("deployment.succeeded"));
        assert_eq!(value(FIELD_REGION), Some("iad1"));

        assert!(!a.field(FIELD_LIVE_URL).unwrap().short);
        assert!(!a.field(FIELD_MESSAGE).unwrap().short);
        assert!(a.field(FIELD_PROJECT).unwrap().short);
    }

    #[test]
    fn test_succeeded_has_one_primary_visit_action() {
        let message = transform(succeeded_event());
        let actions = message.attachments()[0].actions();

        let visits: Vec<&Action> = actions.iter().filter(|a| a.text == "Visit Site").collect();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].style.as_deref(), Some("primary"));
        assert_eq!(visits[0].url.as_deref(), Some("https://web-abc123.vercel.app"));

        let labels: Vec<_> = actions.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Visit Site", "View Details", "Project Dashboard", "View Repository"]
        );
        assert!(actions.iter().all(|a| a.kind == "button"));
    }

    #[test]
    fn test_created_event_has_no_live_url() {
        let mut raw = succeeded_event();
        raw["type"] = json!("deployment.created");
        let message = transform(raw);
        let a = &message.attachments()[0];

        assert!(a.field(FIELD_LIVE_URL).is_none());
        assert!(a.actions().iter().all(|action| action.text != "Visit Site"));
        assert_eq!(a.title.as_deref(), Some(":rocket: Deployment Started"));
    }

    #[test]
    fn test_canceled_event_keeps_error_text() {
        let message = transform(json!({
            "type": "deployment.canceled",
            "id": "evt_2",
            "createdAt": 1704067200000_i64,
            "payload": {
                "project": { "name": "web" },
                "deployment": {
                    "id": "dpl_2",
                    "errorMessage": "Canceled by a newer deployment"
                }
            }
        }));

        let a = &message.attachments()[0];
        assert_eq!(a.title.as_deref(), Some(":no_entry_sign: Deployment Canceled"));
        assert_eq!(a.text.as_deref(), Some("Canceled by a newer deployment"));
    }

    #[test]
    fn test_legacy_error_payload() {
        let message = transform(json!({
            "deployment": {
                "id": "dpl_9",
                "errorMessage": "Build failed: Module not found",
                "inspectorUrl": "https://vercel.com/acme/web/inspect/dpl_9"
            },
            "project": { "name": "web" },
            "target": "production"
        }));

        let a = &message.attachments()[0];
        assert_eq!(a.color.as_deref(), Some(ERROR_COLOR));
        assert_eq!(a.title.as_deref(), Some(":x: Deployment Failed"));
        assert_eq!(a.text.as_deref(), Some("Build failed: Module not found"));
        assert_eq!(
            a.field(FIELD_EVENT).map(|f| f.value.as_str()),
            Some("deployment.error")
        );

        let details = &a.actions()[0];
        assert_eq!(details.text, "View Error Details");
        assert_eq!(details.style.as_deref(), Some("danger"));
    }

    #[test]
    fn test_commit_message_truncation() {
        let long = "a".repeat(250);
        let exact = "b".repeat(200);

        for (input, expected) in [
            (long.clone(), format!("{}...", "a".repeat(200))),
            (exact.clone(), exact.clone()),
        ] {
            let message = transform(json!({
                "type": "deployment.created",
                "payload": { "deployment": { "meta": { "githubCommitMessage": input } } }
            }));
            let value = &message.attachments()[0].field(FIELD_MESSAGE).unwrap().value;
            assert_eq!(value, &expected);
        }

        let message = transform(json!({
            "type": "deployment.created",
            "payload": { "deployment": { "meta": { "githubCommitMessage": long } } }
        }));
        let text = message.text.unwrap();
        assert!(text.ends_with(&format!("> {}...", "a".repeat(100))));
    }

    #[test]
    fn test_empty_object_never_fails() {
        let message = transform(json!({}));
        let attachments = message.attachments();
        assert!(!attachments.is_empty());
        assert!(attachments[0].title.as_deref().is_some_and(|t| !t.is_empty()));
        assert_eq!(message.text.as_deref(), Some(":rocket: Deployment Started"));
    }

    #[test]
    fn test_unknown_event_type() {
        let message = transform(json!({ "type": "deployment.promoted", "payload": {} }));
        let a = &message.attachments()[0];
        assert_eq!(a.title.as_deref(), Some(":bell: Deployment Promoted"));
        assert_eq!(a.color.as_deref(), Some("#0070f3"));
    }

    #[test]
    fn test_user_when_no_team() {
        let message = transform(json!({
            "type": "project.created",
            "payload": { "user": { "username": "jdoe" }, "project": { "name": "new-app" } }
        }));
        let a = &message.attachments()[0];
        assert!(a.field(FIELD_TEAM).is_none());
        assert_eq!(a.field(FIELD_USER).map(|f| f.value.as_str()), Some("jdoe"));
    }

    #[test]
    fn test_team_slug_fallback() {
        let message = transform(json!({
            "type": "domain.created",
            "payload": { "team": { "slug": "acme-inc" }, "user": { "name": "Jane" } }
        }));
        let a = &message.attachments()[0];
        assert_eq!(a.field(FIELD_TEAM).map(|f| f.value.as_str()), Some("acme-inc"));
        assert!(a.field(FIELD_USER).is_none());
    }

    #[test]
    fn test_non_object_produces_diagnostic() {
        let raw = json!(["not", "an", "event"]);
        let message = transform(raw.clone());

        assert_eq!(message.text.as_deref(), Some(ERROR_TEXT));
        let a = &message.attachments()[0];
        assert_eq!(a.color.as_deref(), Some(ERROR_COLOR));
        assert_eq!(a.title.as_deref(), Some(ERROR_TITLE));
        assert!(a.text.as_deref().unwrap().starts_with("Failed to process webhook:"));
        assert_eq!(
            a.fallback.as_deref(),
            Some(serde_json::to_string_pretty(&raw).unwrap().as_str())
        );
    }

    #[test]
    fn test_invalid_created_at_produces_diagnostic() {
        let message = transform(json!({
            "type": "deployment.created",
            "createdAt": i64::MAX,
            "payload": {}
        }));
        assert_eq!(message.attachments()[0].title.as_deref(), Some(ERROR_TITLE));
    }

    #[test]
    fn test_trait_transform_never_errors() {
        for raw in [json!(null), json!("x"), json!({}), succeeded_event()] {
            assert!(PayloadTransformer::transform(&transformer(), &raw).is_ok());
        }
    }

    #[test]
    fn test_transform_is_deterministic() {
        for raw in [succeeded_event(), json!({ "deployment": { "url": "x.vercel.app" } })] {
            let first = serde_json::to_string(&transform(raw.clone())).unwrap();
            let second = serde_json::to_string(&transform(raw)).unwrap();
            assert_eq!(first, second);
        }
    }
}
