//! Vercel webhook payloads and their normalization
//!
//! Vercel has shipped two payload shapes. [`detect_variant`] tells them
//! apart once, and [`EventVariant::normalize`] folds both into a single
//! [`VercelEvent`]; nothing downstream looks at the raw shape again.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hookrelay::{lenient, Clock};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{json_kind, TransformError};

pub const DEPLOYMENT_CREATED: &str = "deployment.created";
pub const DEPLOYMENT_SUCCEEDED: &str = "deployment.succeeded";
pub const DEPLOYMENT_READY: &str = "deployment.ready";
pub const DEPLOYMENT_ERROR: &str = "deployment.error";

/// A normalized deployment-platform event
#[derive(Debug, Clone)]
pub struct VercelEvent {
    /// Dotted event name, e.g. `deployment.succeeded`
    pub event_type: String,
    pub id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub payload: EventPayload,
}

/// The two upstream shapes
#[derive(Debug, Clone)]
pub enum EventVariant {
    /// `{type, id, createdAt, payload}`
    Envelope {
        event_type: String,
        id: Option<String>,
        created_at: Option<i64>,
        payload: EventPayload,
    },
    /// Flat payload without an envelope
    Legacy(LegacyPayload),
}

/// Envelope `payload` object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub project: Option<Project>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub deployment: Option<Deployment>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub team: Option<Team>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub links: Option<Links>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub target: Option<String>,
    /// Region the webhook was delivered from
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub plan: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_vec")]
    pub regions: Option<Vec<String>>,
}

/// Flat legacy payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPayload {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub deployment: Option<Deployment>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub project: Option<Project>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub links: Option<Links>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub team: Option<Team>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub plan: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_vec")]
    pub regions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub name: Option<String>,
    /// Host name without scheme
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub inspector_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub target: Option<String>,
    /// `git`, `cli`, `import`, ...
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub created_at: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub building_at: Option<i64>,
    /// Epoch millis when the deployment became ready
    #[serde(default, deserialize_with = "lenient::optional")]
    pub ready: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub meta: Option<DeploymentMeta>,
}

/// Source-control metadata attached to a deployment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct DeploymentMeta(pub BTreeMap<String, Value>);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub deployment: Option<String>,
    #[serde(default, deserialize_with = "lenient::non_empty_string")]
    pub project: Option<String>,
}

/// Decide which shape `raw` is
///
/// An object with a string `type` and an object `payload` is an envelope;
/// any other object is a legacy payload. Non-objects are rejected.
pub fn detect_variant(raw: &Value) -> Result<EventVariant, TransformError> {
    let object = raw
        .as_object()
        .ok_or_else(|| TransformError::NotAnObject(json_kind(raw)))?;

    let event_type = object.get("type").and_then(Value::as_str);
    let payload = object.get("payload").filter(|p| p.is_object());

    match (event_type, payload) {
        (Some(event_type), Some(payload)) => Ok(EventVariant::Envelope {
            event_type: event_type.to_string(),
            id: object.get("id").and_then(Value::as_str).map(str::to_string),
            created_at: object.get("createdAt").and_then(epoch_millis),
            payload: serde_json::from_value(payload.clone())?,
        }),
        _ => Ok(EventVariant::Legacy(serde_json::from_value(raw.clone())?)),
    }
}

impl EventVariant {
    /// Fold either shape into a [`VercelEvent`]
    ///
    /// A missing `createdAt` is taken from `clock`.
    pub fn normalize(self, clock: &dyn Clock) -> Result<VercelEvent, TransformError> {
        let (event_type, id, created_at, payload) = match self {
            EventVariant::Envelope {
                event_type,
                id,
                created_at,
                payload,
            } => (event_type, id, created_at, payload),
            EventVariant::Legacy(legacy) => {
                let event_type = legacy.infer_event_type().to_string();
                let id = legacy.deployment.as_ref().and_then(|d| d.id.clone());
                (event_type, id, None, legacy.into_payload())
            }
        };

        let created_at = match created_at {
            Some(millis) => DateTime::<Utc>::from_timestamp_millis(millis)
                .ok_or(TransformError::InvalidTimestamp(millis))?,
            None => clock.now(),
        };

        Ok(VercelEvent {
            event_type,
            id,
            created_at,
            payload,
        })
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, EventVariant::Legacy(_))
    }
}

impl LegacyPayload {
    /// Legacy payloads carry no event name; infer one from the deployment state
    pub fn infer_event_type(&self) -> &'static str {
        let deployment = self.deployment.as_ref();

        let failed = deployment.is_some_and(|d| {
            d.state.as_deref() == Some("ERROR") || d.error_message.is_some()
        });
        if failed {
            return DEPLOYMENT_ERROR;
        }

        let has_url = deployment.is_some_and(|d| d.url.is_some());
        if has_url && self.target.as_deref() == Some("production") {
            return DEPLOYMENT_SUCCEEDED;
        }

        DEPLOYMENT_CREATED
    }

    fn into_payload(self) -> EventPayload {
        EventPayload {
            project: self.project,
            deployment: self.deployment,
            team: self.team,
            user: self.user,
            links: self.links,
            target: self.target,
            region: None,
            plan: self.plan,
            regions: self.regions,
        }
    }
}

impl VercelEvent {
    /// `deployment.succeeded` or `deployment.ready`
    pub fn is_live(&self) -> bool {
        self.event_type == DEPLOYMENT_SUCCEEDED || self.event_type == DEPLOYMENT_READY
    }

    pub fn is_error(&self) -> bool {
        self.event_type == DEPLOYMENT_ERROR
    }

    pub fn deployment(&self) -> Option<&Deployment> {
        self.payload.deployment.as_ref()
    }

    pub fn meta(&self) -> Option<&DeploymentMeta> {
        self.deployment().and_then(|d| d.meta.as_ref())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.payload.project.as_ref().and_then(|p| p.name.as_deref())
    }

    /// Deployment target, falling back to the payload target
    pub fn target(&self) -> Option<&str> {
        self.deployment()
            .and_then(|d| d.target.as_deref())
            .or(self.payload.target.as_deref())
    }

    /// Deployment host, only for live events
    pub fn live_url(&self) -> Option<&str> {
        if !self.is_live() {
            return None;
        }
        self.deployment().and_then(|d| d.url.as_deref())
    }

    /// Dashboard link for the deployment, else its inspector URL
    pub fn details_url(&self) -> Option<&str> {
        self.payload
            .links
            .as_ref()
            .and_then(|l| l.deployment.as_deref())
            .or_else(|| self.deployment().and_then(|d| d.inspector_url.as_deref()))
    }

    pub fn project_url(&self) -> Option<&str> {
        self.payload.links.as_ref().and_then(|l| l.project.as_deref())
    }

    /// `ready - buildingAt` in milliseconds, when both are known and ordered
    pub fn build_duration_ms(&self) -> Option<u64> {
        let deployment = self.deployment()?;
        let elapsed = deployment.ready?.checked_sub(deployment.building_at?)?;
        u64::try_from(elapsed).ok()
    }
}

impl DeploymentMeta {
    /// Non-empty string value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

fn epoch_millis(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}
