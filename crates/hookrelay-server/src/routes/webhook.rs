//! Webhook Routes - Upstream → Mattermost
//!
//! Each route parses the body, runs the matching transformer and forwards
//! the result to the destination resolved from the query string or config.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{error, info, warn};

use hookrelay::WebhookSource;

use crate::error::ApiError;
use crate::models::{BridgeResponse, ErrorResponse, WebhookQuery};
use crate::telemetry::{log_payload, short_url};
use crate::AppState;

/// Relay a Discord execute-webhook payload
#[utoipa::path(
    post,
    path = "/discord",
    params(WebhookQuery),
    request_body(content = String, description = "Discord webhook JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Delivered to Mattermost", body = BridgeResponse),
        (status = 400, description = "Missing destination or invalid payload", body = ErrorResponse),
        (status = 502, description = "Destination rejected or unreachable", body = BridgeResponse)
    ),
    tag = "Webhook"
)]
pub async fn discord_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<BridgeResponse>), ApiError> {
    relay(&state, WebhookSource::Discord, &query, &body).await
}

/// Relay a Vercel deployment webhook
#[utoipa::path(
    post,
    path = "/vercel",
    params(WebhookQuery),
    request_body(content = String, description = "Vercel webhook JSON (envelope or legacy shape)", content_type = "application/json"),
    responses(
        (status = 200, description = "Delivered to Mattermost", body = BridgeResponse),
        (status = 400, description = "Missing destination or invalid payload", body = ErrorResponse),
        (status = 502, description = "Destination rejected or unreachable", body = BridgeResponse)
    ),
    tag = "Webhook"
)]
pub async fn vercel_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<BridgeResponse>), ApiError> {
    relay(&state, WebhookSource::Vercel, &query, &body).await
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn relay(
    state: &AppState,
    source: WebhookSource,
    query: &WebhookQuery,
    body: &[u8],
) -> Result<(StatusCode, Json<BridgeResponse>), ApiError> {
    let url = query
        .resolve(state.default_webhook_url.as_deref())
        .ok_or_else(|| {
            warn!(%source, "⚠️  No destination URL in request or config");
            ApiError::MissingWebhookUrl
        })?;

    info!(%source, url = %short_url(&url), "📥 {} webhook received", source.display_name());

    let raw: Value = serde_json::from_slice(body).map_err(|e| {
        warn!(%source, error = %e, "⚠️  Body is not JSON");
        ApiError::InvalidPayload(source)
    })?;
    log_payload(state.log_payloads, "Inbound payload", &raw);

    let message = state.transformer(source).transform(&raw).map_err(|e| {
        warn!(%source, error = %e, "⚠️  Payload rejected by transformer");
        ApiError::InvalidPayload(source)
    })?;
    log_payload(state.log_payloads, "Transformed payload", &message);

    let delivery = state.sender.deliver(&url, &message).await?;
    let response = BridgeResponse::from_delivery(&delivery);

    if response.success {
        info!(%source, delivery_id = %delivery.id, "✅ Delivered to Mattermost");
    } else {
        error!(
            %source,
            delivery_id = %delivery.id,
            status = ?delivery.status_code,
            "❌ Delivery failed: {}",
            response.message
        );
    }

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(response)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            WebhookSource::Discord.path(),
            post(discord_webhook).fallback(method_not_allowed),
        )
        .route(
            WebhookSource::Vercel.path(),
            post(vercel_webhook).fallback(method_not_allowed),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use hookrelay::{
        DomainError, FixedClock, MattermostMessage, WebhookDelivery, WebhookSender,
    };
    use hookrelay_integration_discord::DiscordTransformer;
    use hookrelay_integration_vercel::VercelTransformer;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    /// Records deliveries and answers with a fixed destination status
    struct StubSender {
        status: Option<u16>,
        calls: Mutex<Vec<(String, MattermostMessage)>>,
    }

    impl StubSender {
        fn answering(status: Option<u16>) -> Arc<Self> {
            Arc::new(Self {
                status,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, MattermostMessage)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WebhookSender for StubSender {
        async fn deliver(
            &self,
            url: &str,
            message: &MattermostMessage,
        ) -> Result<WebhookDelivery, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), message.clone()));

            let delivery = WebhookDelivery::new();
            Ok(match self.status {
                Some(code) if (200..300).contains(&code) => delivery.success(code, None),
                Some(code) => delivery.failed(Some(code), "rejected".to_string()),
                None => delivery.failed(None, "connection refused".to_string()),
            })
        }
    }

    fn app_with(sender: Arc<StubSender>, default_url: Option<&str>) -> Router {
        crate::app(AppState {
            discord: Arc::new(DiscordTransformer::new()),
            vercel: Arc::new(VercelTransformer::with_clock(Arc::new(
                FixedClock::from_millis(1_704_067_200_000),
            ))),
            sender,
            default_webhook_url: default_url.map(str::to_string),
            log_payloads: true,
        })
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_discord_relay() {
        let sender = StubSender::answering(Some(200));
        let app = app_with(sender.clone(), None);

        let (status, body) = send(
            app,
            post_json(
                "/discord?url=https%3A%2F%2Fchat.example.com%2Fhooks%2Fabc",
                r#"{"content":"Hello from Discord!","username":"Test Bot"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Notification sent successfully"));
        assert_eq!(body["status"], json!(200));

        let calls = sender.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://chat.example.com/hooks/abc");
        assert_eq!(calls[0].1.text.as_deref(), Some("Hello from Discord!"));
        assert_eq!(calls[0].1.username.as_deref(), Some("Test Bot"));
    }

    #[tokio::test]
    async fn test_destination_precedence() {
        let sender = StubSender::answering(Some(200));
        let app = app_with(sender.clone(), Some("https://default/hooks/1"));
        send(app, post_json("/discord?webhook_url=https://alias/hooks/2", "{}")).await;

        let app = app_with(sender.clone(), Some("https://default/hooks/1"));
        send(app, post_json("/discord", "{}")).await;

        let urls: Vec<_> = sender.calls().into_iter().map(|(url, _)| url).collect();
        assert_eq!(urls, vec!["https://alias/hooks/2", "https://default/hooks/1"]);
    }

    #[tokio::test]
    async fn test_missing_destination() {
        let sender = StubSender::answering(Some(200));
        let (status, body) =
            send(app_with(sender.clone(), None), post_json("/vercel", "{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            json!("Missing webhook URL parameter (?url=...) or MATTERMOST_WEBHOOK_URL environment variable")
        );
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let sender = StubSender::answering(Some(200));
        let (status, body) = send(
            app_with(sender.clone(), Some("https://default/hooks/1")),
            post_json("/discord", "{not json"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Invalid Discord webhook payload"));
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_discord_non_object() {
        let sender = StubSender::answering(Some(200));
        let (status, body) = send(
            app_with(sender, Some("https://default/hooks/1")),
            post_json("/discord", "[1, 2, 3]"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Invalid Discord webhook payload"));
    }

    #[tokio::test]
    async fn test_vercel_non_object_is_forwarded_as_diagnostic() {
        let sender = StubSender::answering(Some(200));
        let (status, _) = send(
            app_with(sender.clone(), Some("https://default/hooks/1")),
            post_json("/vercel", r#""just a string""#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let calls = sender.calls();
        let attachment = &calls[0].1.attachments()[0];
        assert_eq!(
            attachment.title.as_deref(),
            Some(":warning: Vercel Webhook Processing Error")
        );
    }

    #[tokio::test]
    async fn test_vercel_relay() {
        let sender = StubSender::answering(Some(200));
        let (status, _) = send(
            app_with(sender.clone(), Some("https://default/hooks/1")),
            post_json(
                "/vercel",
                r#"{"type":"deployment.error","createdAt":1704067200000,"payload":{"project":{"name":"web"}}}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let calls = sender.calls();
        assert_eq!(calls[0].1.username.as_deref(), Some("Vercel"));
        assert_eq!(
            calls[0].1.attachments()[0].color.as_deref(),
            Some("#ee0000")
        );
    }

    #[tokio::test]
    async fn test_destination_failure_is_bad_gateway() {
        let sender = StubSender::answering(Some(500));
        let (status, body) = send(
            app_with(sender, Some("https://default/hooks/1")),
            post_json("/discord", r#"{"content":"hi"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["status"], json!(502));
        assert_eq!(body["message"], json!("Failed to send notification: 500 rejected"));

        let sender = StubSender::answering(None);
        let (status, body) = send(
            app_with(sender, Some("https://default/hooks/1")),
            post_json("/discord", r#"{"content":"hi"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["message"],
            json!("Error sending notification: connection refused")
        );
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/vercel")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app_with(StubSender::answering(Some(200)), None), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body["error"],
            json!("Method not allowed. Use POST for webhook endpoints.")
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, body) = send(
            app_with(StubSender::answering(Some(200)), None),
            post_json("/slack", "{}"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("Not found"));
        assert_eq!(
            body["available_endpoints"],
            json!([
                "/discord?url=<mattermost_webhook_url>",
                "/vercel?url=<mattermost_webhook_url>",
                "/health"
            ])
        );
    }

    #[tokio::test]
    async fn test_health() {
        for uri in ["/health", "/"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let (status, body) =
                send(app_with(StubSender::answering(Some(200)), None), request).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], json!("healthy"));
            assert_eq!(body["endpoints"], json!(["/discord", "/vercel"]));
            assert!(body["timestamp"].is_string());
        }
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let request = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app_with(StubSender::answering(Some(200)), None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/discord"].is_object());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/discord")
            .header("origin", "https://dashboard.example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app_with(StubSender::answering(Some(200)), None)
            .oneshot(request)
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_cors_header_on_relay_response() {
        let mut request = post_json(
            "/vercel?url=https%3A%2F%2Fchat.example.com%2Fhooks%2Fabc",
            "{}",
        );
        request
            .headers_mut()
            .insert("origin", "https://dashboard.example.com".parse().unwrap());

        let response = app_with(StubSender::answering(Some(200)), None)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
