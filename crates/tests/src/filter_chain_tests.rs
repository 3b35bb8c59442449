//! Filter and Forwarding Chain Tests
//!
//! These tests validate the request path through the full router:
//! - Allowed single calls and batches reach the upstream unchanged
//! - Denylisted calls are answered with 405 and never reach the upstream
//! - Malformed bodies are answered with 400 and never reach the upstream

#![allow(clippy::expect_used)]

use crate::mock_infrastructure::{
    build_app, build_app_with_policy, into_parts, post_rpc, UpstreamMockBuilder,
};
use axum::http::StatusCode;
use sentinel_core::filter::MatchPolicy;

const DENYLIST: &[&str] = &["eth_sendTransaction", "personal_sign", "eth_sign"];

#[tokio::test]
async fn test_allowed_call_reaches_upstream_byte_for_byte() {
    // Odd spacing and key order must survive untouched.
    let body = "{ \"params\" : [ {\"to\":\"0x01\"} , \"latest\" ],\n  \"method\":\"eth_call\", \"id\":7, \"jsonrpc\":\"2.0\" }";
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.mock_echo(body);

    let app = build_app(DENYLIST, &upstream.url());
    let (status, text) = into_parts(post_rpc(app, body).await).await;

    assert_eq!(status, StatusCode::OK);
    let reply: serde_json::Value = serde_json::from_str(&text).expect("json reply");
    assert_eq!(reply["result"], "0x1");
    assert!(upstream.verify_all_called());
}

#[tokio::test]
async fn test_allowed_batch_reaches_upstream() {
    let body = r#"[{"jsonrpc":"2.0","id":1,"method":"eth_blockNumber"},{"jsonrpc":"2.0","id":2,"method":"eth_chainId"}]"#;
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.mock_echo(body);

    let app = build_app(DENYLIST, &upstream.url());
    let (status, _) = into_parts(post_rpc(app, body).await).await;

    assert_eq!(status, StatusCode::OK);
    assert!(upstream.verify_all_called());
}

#[tokio::test]
async fn test_denylisted_call_never_reaches_upstream() {
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.expect_no_calls();

    let app = build_app(DENYLIST, &upstream.url());
    let (status, text) =
        into_parts(post_rpc(app, r#"{"jsonrpc":"2.0","id":1,"method":"eth_sendTransaction"}"#).await)
            .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(text, "method eth_sendTransaction is not allowed");
    assert!(upstream.verify_all_called());
}

#[tokio::test]
async fn test_batch_reports_first_denylisted_method() {
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.expect_no_calls();

    let app = build_app(DENYLIST, &upstream.url());
    let body = r#"[{"method":"eth_call"},{"method":"personal_sign"},{"method":"eth_sign"}]"#;
    let (status, text) = into_parts(post_rpc(app, body).await).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(text, "method personal_sign is not allowed");
    assert!(upstream.verify_all_called());
}

#[tokio::test]
async fn test_malformed_body_never_reaches_upstream() {
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.expect_no_calls();

    let app = build_app(DENYLIST, &upstream.url());
    let (status, text) = into_parts(post_rpc(app, "{\"method\": ").await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!text.is_empty());
    assert!(upstream.verify_all_called());
}

#[tokio::test]
async fn test_normalized_policy_blocks_case_variants() {
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.expect_no_calls();

    let app = build_app(DENYLIST, &upstream.url());
    let (status, text) = into_parts(post_rpc(app, r#"{"method":"ETH_SIGN"}"#).await).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(text, "method ETH_SIGN is not allowed");
}

#[tokio::test]
async fn test_exact_policy_forwards_case_variants() {
    let body = r#"{"method":"ETH_SIGN"}"#;
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.mock_echo(body);

    let app = build_app_with_policy(DENYLIST, MatchPolicy::Exact, &upstream.url());
    let (status, _) = into_parts(post_rpc(app, body).await).await;

    assert_eq!(status, StatusCode::OK);
    assert!(upstream.verify_all_called());
}

#[tokio::test]
async fn test_same_body_classified_the_same_every_time() {
    let mut upstream = UpstreamMockBuilder::new().await;
    upstream.expect_no_calls();

    let app = build_app(DENYLIST, &upstream.url());
    for _ in 0..3 {
        let (status, text) =
            into_parts(post_rpc(app.clone(), r#"[{"method":"eth_sign"}]"#).await).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(text, "method eth_sign is not allowed");
    }
    assert!(upstream.verify_all_called());
}
