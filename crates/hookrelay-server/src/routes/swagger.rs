//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{BridgeResponse, ErrorResponse, HealthCheck};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        super::health::health_check,
        // Webhooks
        super::webhook::discord_webhook,
        super::webhook::vercel_webhook,
    ),
    info(
        title = "hookrelay API",
        version = "0.1.0",
        description = "Stateless webhook relay: Discord and Vercel webhooks in, Mattermost incoming-webhook messages out.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Webhook", description = "Transform and forward upstream webhooks"),
    ),
    components(
        schemas(
            BridgeResponse,
            ErrorResponse,
            HealthCheck,
        )
    ),
)]
pub struct ApiDoc;
