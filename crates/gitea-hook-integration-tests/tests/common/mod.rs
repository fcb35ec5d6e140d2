//! Common test utilities for gitea-hook-api integration tests
//!
//! This module provides:
//! - Builders for application state and routers
//! - Signed and unsigned delivery builders
//! - Fixture payloads shared with the core crate

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use gitea_hook_api::{create_router, AppState, ServiceConfig};
use gitea_hook_core::webhook::signature::compute_signature;

pub const SECRET: &str = "integration-secret";
pub const DELIVERY_ID: &str = "f6266f16-1bf3-46a5-9ea4-602e06ead473";

pub const PUSH_EVENT: &str = include_str!("../../../gitea-hook-core/tests/fixtures/push-event.json");
pub const ISSUES_EVENT: &str =
    include_str!("../../../gitea-hook-core/tests/fixtures/issues-event.json");
pub const PULL_REQUEST_EVENT: &str =
    include_str!("../../../gitea-hook-core/tests/fixtures/pull-request-event.json");
pub const RELEASE_EVENT: &str =
    include_str!("../../../gitea-hook-core/tests/fixtures/release-event.json");

// ============================================================================
// State builders
// ============================================================================

/// Configuration with the given secret and subscription.
#[allow(dead_code)]
pub fn create_test_config(secret: Option<&str>, events: &[&str]) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.webhook.secret = secret.map(str::to_string);
    config.webhook.events = events.iter().map(|e| e.to_string()).collect();
    config
}

#[allow(dead_code)]
pub fn create_test_app_state(secret: Option<&str>, events: &[&str]) -> AppState {
    AppState::new(create_test_config(secret, events)).expect("test config is valid")
}

/// Router with [`SECRET`] and every implemented event subscribed.
#[allow(dead_code)]
pub fn create_signed_router() -> Router {
    create_router(AppState::new(signed_config()).expect("test config is valid"))
}

#[allow(dead_code)]
pub fn signed_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.webhook.secret = Some(SECRET.to_string());
    config
}

// ============================================================================
// Request builders
// ============================================================================

/// POST delivery of `body` for `event`, signed with [`SECRET`].
#[allow(dead_code)]
pub fn signed_delivery(event: &str, body: &str) -> Request<Body> {
    delivery(event)
        .header(
            "X-Gitea-Signature",
            compute_signature(SECRET.as_bytes(), body.as_bytes()).expect("valid key"),
        )
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// POST delivery of `body` for `event` without a signature.
#[allow(dead_code)]
pub fn unsigned_delivery(event: &str, body: &str) -> Request<Body> {
    delivery(event)
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn delivery(event: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(Method::POST)
        .uri(gitea_hook_core::SERVER_PATH)
        .header("X-Gitea-Event", event)
        .header("X-Gitea-Delivery", DELIVERY_ID)
        .header("content-type", "application/json")
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}
