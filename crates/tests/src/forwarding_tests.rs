//! Upstream Relay Tests
//!
//! Allowed requests are forwarded once; whatever the upstream answers is relayed, and transport
//! failures surface as gateway errors.

#![allow(clippy::expect_used)]

use crate::mock_infrastructure::{build_app, into_parts, post_rpc, UpstreamMockBuilder};
use axum::http::StatusCode;

#[tokio::test]
async fn test_upstream_error_status_is_relayed() {
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.mock_status("eth_call", 503, r#"{"error":"overloaded"}"#);

    let app = build_app(&["eth_sign"], &upstream.url());
    let response = post_rpc(app, r#"{"jsonrpc":"2.0","id":1,"method":"eth_call"}"#).await;

    assert_eq!(response.headers()["content-type"], "application/json");
    let (status, text) = into_parts(response).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(text, r#"{"error":"overloaded"}"#);
}

#[tokio::test]
async fn test_json_rpc_error_body_is_relayed() {
    let error_body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"the method does not exist"}}"#;
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.mock_status("debug_traceTransaction", 200, error_body);

    let app = build_app(&["eth_sign"], &upstream.url());
    let (status, text) =
        into_parts(post_rpc(app, r#"{"id":1,"method":"debug_traceTransaction"}"#).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, error_body);
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let app = build_app(&["eth_sign"], "http://127.0.0.1:9");
    let (status, text) = into_parts(post_rpc(app, r#"{"method":"eth_call"}"#).await).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(text.starts_with("Connection failed"));
}

#[tokio::test]
async fn test_health_bypasses_filter() {
    let app = build_app(&["eth_sign"], "http://127.0.0.1:9");
    let response = tower::ServiceExt::oneshot(
        app,
        axum::http::Request::builder()
            .uri("/health")
            .body(axum::body::Body::empty())
            .expect("valid request"),
    )
    .await
    .expect("router is infallible");

    let (status, text) = into_parts(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "OK");
}
