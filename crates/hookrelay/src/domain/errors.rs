//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    pub fn invalid_payload<T: AsRef<str>>(source: T, reason: impl std::fmt::Display) -> Self {
        Self::Validation(format!("Invalid {} payload: {}", source.as_ref(), reason))
    }
}
