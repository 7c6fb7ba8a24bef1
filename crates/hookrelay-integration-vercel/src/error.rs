//! Transformation errors
//!
//! These never reach callers of `VercelTransformer::transform_value`; they
//! select the diagnostic fallback message instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("createdAt {0} is not a valid timestamp")]
    InvalidTimestamp(i64),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// JSON type name, for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
