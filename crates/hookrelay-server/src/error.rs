//! API Errors
//!
//! Every error leaves the server as a JSON body with an `error` message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use hookrelay::{DomainError, WebhookSource};

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing webhook URL parameter (?url=...) or MATTERMOST_WEBHOOK_URL environment variable")]
    MissingWebhookUrl,

    #[error("Invalid {} webhook payload", .0.display_name())]
    InvalidPayload(WebhookSource),

    #[error("Method not allowed. Use POST for webhook endpoints.")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,

    #[error("Delivery could not be attempted: {0}")]
    Delivery(#[from] DomainError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingWebhookUrl | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            available_endpoints: matches!(self, ApiError::NotFound)
                .then(ErrorResponse::available_endpoints),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
