use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hookrelay::{PayloadTransformer, WebhookSender, WebhookSource};
use hookrelay_integration_discord::DiscordTransformer;
use hookrelay_integration_vercel::VercelTransformer;

mod adapters;
mod config;
mod error;
mod models;
mod routes;
mod telemetry;

use adapters::HttpWebhookSender;
use config::RelayConfig;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub discord: Arc<dyn PayloadTransformer>,
    pub vercel: Arc<dyn PayloadTransformer>,
    pub sender: Arc<dyn WebhookSender>,
    /// Used when the request carries no `?url=`
    pub default_webhook_url: Option<String>,
    pub log_payloads: bool,
}

impl AppState {
    pub fn transformer(&self, source: WebhookSource) -> &dyn PayloadTransformer {
        match source {
            WebhookSource::Discord => self.discord.as_ref(),
            WebhookSource::Vercel => self.vercel.as_ref(),
        }
    }
}

/// Build the router with all routes and layers
fn app(state: AppState) -> Router {
    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(routes::health::router())
        .merge(routes::webhook::router())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
    }
    tracing::info!("👋 Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = RelayConfig::from_env().context("Invalid configuration")?;
    telemetry::init_tracing(&config.log_level);

    tracing::info!("🔗 hookrelay initializing...");

    match &config.default_webhook_url {
        Some(url) => tracing::info!("📮 Default destination: {}", telemetry::short_url(url)),
        None => tracing::warn!("⚠️  No MATTERMOST_WEBHOOK_URL set - requests must pass ?url="),
    }

    if config.log_payloads {
        tracing::info!("📝 Payload logging enabled");
    }

    let sender = HttpWebhookSender::with_config(config.delivery_config())
        .context("Failed to initialize webhook sender")?;

    tracing::info!(
        "🔔 Webhook sender initialized (timeout {}ms)",
        sender.config().timeout_ms
    );

    // Create application state
    let state = AppState {
        discord: Arc::new(DiscordTransformer::new()),
        vercel: Arc::new(VercelTransformer::new()),
        sender: Arc::new(sender),
        default_webhook_url: config.default_webhook_url.clone(),
        log_payloads: config.log_payloads,
    };

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!(
        "✅ hookrelay listening on {}",
        listener.local_addr().context("Listener has no address")?
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
