//! Integration tests for status code mapping at the HTTP layer.

mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{create_signed_router, create_test_app_state, read_json, signed_delivery};
use gitea_hook_api::create_router;
use tower::ServiceExt;

#[tokio::test]
async fn test_unsubscribed_event_is_accepted() -> Result<()> {
    let router = create_router(create_test_app_state(Some(common::SECRET), &["push"]));

    let response = router
        .oneshot(signed_delivery("release", common::RELEASE_EVENT))
        .await?;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(read_json(response).await["error"], "event_not_subscribed");
    Ok(())
}

/// Verify that Gitea kinds without a payload shape answer 501.
#[tokio::test]
async fn test_unimplemented_event_is_not_implemented() -> Result<()> {
    let router = create_router(create_test_app_state(
        Some(common::SECRET),
        &["push", "issue_comment"],
    ));

    let response = router
        .oneshot(signed_delivery("issue_comment", r#"{"action": "created"}"#))
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(read_json(response).await["error"], "unimplemented_event");
    Ok(())
}

/// Verify that a subscribed but unknown kind answers 400.
#[tokio::test]
async fn test_unknown_event_is_bad_request() -> Result<()> {
    let router = create_router(create_test_app_state(Some(common::SECRET), &["push", "wiki"]));

    let response = router.oneshot(signed_delivery("wiki", "{}")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "unknown_event");
    Ok(())
}

#[tokio::test]
async fn test_non_post_methods_are_rejected() -> Result<()> {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let request = Request::builder()
            .method(method.clone())
            .uri(gitea_hook_core::SERVER_PATH)
            .header("X-Gitea-Event", "push")
            .body(Body::empty())?;

        let response = create_signed_router().oneshot(request).await?;

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method {method}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_body_is_bad_request() -> Result<()> {
    let response = create_signed_router()
        .oneshot(signed_delivery("push", ""))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "empty_body");
    Ok(())
}

#[tokio::test]
async fn test_unknown_path_is_not_found() -> Result<()> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/github/webhooks")
        .body(Body::empty())?;

    let response = create_signed_router().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
