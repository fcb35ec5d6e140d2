//! # Gitea Hook HTTP Service
//!
//! HTTP front end for the Gitea webhook verifier in `gitea-hook-core`.
//!
//! This service provides:
//! - the webhook endpoint, which verifies, filters and decodes deliveries
//! - a health check endpoint
//!
//! Every verifier rejection is turned into a status code by
//! [`errors::WebhookHandlerError`].

pub mod config;
pub mod errors;

pub use config::{LoggingConfig, ServerConfig, ServiceConfig, WebhookSettings};
pub use errors::{ConfigError, ServiceError, WebhookHandlerError};

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, Request, StatusCode},
    response::Json,
    routing::{any, get},
    Router,
};
use bytes::{Buf, Bytes};
use gitea_hook_core::{EventKind, Webhook};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

/// Header carrying Gitea's per-delivery identifier.
pub const DELIVERY_HEADER: &str = "X-Gitea-Delivery";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: Arc<ServiceConfig>,

    /// Verifier built from the webhook settings
    pub webhook: Arc<Webhook>,

    /// Event kinds accepted by the endpoint
    pub events: Arc<[EventKind]>,
}

impl AppState {
    /// Create application state from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration fails validation.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let events: Arc<[EventKind]> = config.subscribed_events().into();
        for kind in events.iter().filter(|kind| !kind.is_recognized()) {
            warn!(
                event = %kind,
                "Subscribed event kind is not a Gitea event; deliveries will be rejected as unknown"
            );
        }

        let webhook = Webhook::new(config.webhook_config());
        if !webhook.requires_signature() {
            warn!("No webhook secret configured; signatures will not be checked");
        }

        Ok(Self {
            config: Arc::new(config),
            webhook: Arc::new(webhook),
            events,
        })
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create HTTP router with all endpoints
///
/// The webhook route accepts every method so that the verifier, not the
/// router, answers non-`POST` requests.
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_body_size;

    Router::new()
        .route(&state.config.server.endpoint_path, any(handle_webhook))
        .route("/health", get(handle_health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_size))
                .into_inner(),
        )
        .with_state(state)
}

/// Start HTTP server
///
/// Runs until SIGINT or SIGTERM, then lets in-flight requests finish.
pub async fn start_server(config: ServiceConfig) -> Result<(), ServiceError> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config)?;
    let endpoint = state.config.server.endpoint_path.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ServiceError::BindFailed {
            address: address.clone(),
            message: e.to_string(),
        })?;

    info!(address = %address, endpoint = %endpoint, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Handle Gitea webhook requests
///
/// Verification runs on the blocking pool since it hashes and parses the
/// whole body.
#[instrument(skip(state, headers, body), fields(
    delivery = headers
        .get(DELIVERY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(""),
))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookHandlerError> {
    let mut builder = Request::builder().method(method);
    if let Some(request_headers) = builder.headers_mut() {
        *request_headers = headers;
    }
    let request = builder
        .body(body.reader())
        .map_err(|e| WebhookHandlerError::InternalError {
            message: format!("failed to rebuild request: {e}"),
        })?;

    let webhook = Arc::clone(&state.webhook);
    let events = Arc::clone(&state.events);
    let span = tracing::Span::current();
    let payload = tokio::task::spawn_blocking(move || {
        span.in_scope(|| webhook.verify_and_decode(request, &events))
    })
    .await
    .map_err(|e| WebhookHandlerError::InternalError {
        message: format!("verification task failed: {e}"),
    })??;

    Ok(Json(WebhookResponse {
        status: "processed".to_string(),
        event: payload.event_kind().to_string(),
        repository: payload.repository().map(|r| r.full_name.clone()),
        sender: payload.sender().map(|u| u.login.clone()),
    }))
}

/// Basic health check endpoint
async fn handle_health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

// ============================================================================
// Response Types
// ============================================================================

/// Body returned for an accepted delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub status: String,

    /// Value of the event header
    pub event: String,

    /// `owner/name` of the repository the event concerns, if any
    pub repository: Option<String>,

    /// Login of the user that triggered the event, if any
    pub sender: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
