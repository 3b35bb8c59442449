//! Test Helper Functions and Utilities
//!
//! Builds the full application router and drives requests through it.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use sentinel_core::{
    config::{ServerConfig, UpstreamConfig},
    filter::{FilterConfig, MatchPolicy, MethodFilter},
    upstream::UpstreamClient,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Builds the proxy router with the normalized policy.
///
/// # Panics
///
/// Panics if the denylist is empty or the upstream client cannot be built.
#[must_use]
pub fn build_app(denylist: &[&str], upstream_url: &str) -> Router {
    build_app_with_policy(denylist, MatchPolicy::Normalized, upstream_url)
}

/// Builds the proxy router with an explicit match policy.
///
/// # Panics
///
/// Panics if the denylist is empty or the upstream client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn build_app_with_policy(denylist: &[&str], policy: MatchPolicy, upstream_url: &str) -> Router {
    let filter_config = FilterConfig::new(denylist.iter().copied()).with_match_policy(policy);
    let filter = Arc::new(MethodFilter::new(&filter_config).expect("valid filter config"));
    let upstream = Arc::new(
        UpstreamClient::new(&UpstreamConfig { url: upstream_url.to_string(), timeout_seconds: 2 })
            .expect("valid upstream config"),
    );

    server::router::create_app(filter, upstream, &ServerConfig::default())
}

/// Sends `body` as a JSON `POST /` through `app`.
///
/// # Panics
///
/// Panics if the request cannot be built or the router fails.
#[allow(clippy::expect_used)]
pub async fn post_rpc(app: Router, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(body.into())
        .expect("valid request");

    app.oneshot(request).await.expect("router is infallible")
}

/// Collects a response into its status and body text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
#[allow(clippy::expect_used)]
pub async fn into_parts(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("readable body");
    (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
}
