//! Integration tests for building the service from configuration files.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{read_json, signed_delivery, PUSH_EVENT, SECRET};
use gitea_hook_api::{create_router, AppState, ServiceConfig};
use serial_test::serial;
use std::io::Write;
use tower::ServiceExt;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> Result<String> {
    let path = dir.path().join("service.yaml");
    std::fs::File::create(&path)?.write_all(contents.as_bytes())?;
    Ok(path.to_string_lossy().into_owned())
}

/// Verify that settings loaded from YAML drive the router.
#[tokio::test]
#[serial]
async fn test_router_built_from_yaml() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_config(
        &dir,
        &format!("webhook:\n  secret: {SECRET}\n  events: [push]\n"),
    )?;

    let config = ServiceConfig::load_from(&[], Some(&path))?;
    let router = create_router(AppState::new(config)?);

    let response = router.oneshot(signed_delivery("push", PUSH_EVENT)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["repository"], "gitea/webhooks");
    Ok(())
}

/// Verify that a subscription narrowed in YAML is honoured.
#[tokio::test]
#[serial]
async fn test_yaml_subscription_filters_events() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_config(
        &dir,
        &format!("webhook:\n  secret: {SECRET}\n  events: [release]\n"),
    )?;

    let config = ServiceConfig::load_from(&[], Some(&path))?;
    let router = create_router(AppState::new(config)?);

    let response = router.oneshot(signed_delivery("push", PUSH_EVENT)).await?;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    Ok(())
}

#[test]
#[serial]
fn test_invalid_yaml_config_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_config(&dir, "server:\n  endpoint_path: no-slash\n")?;

    assert!(ServiceConfig::load_from(&[], Some(&path)).is_err());
    Ok(())
}
