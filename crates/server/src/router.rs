use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, StatusCode},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use sentinel_core::{config::ServerConfig, filter::MethodFilter, upstream::UpstreamClient};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::middleware::method_denylist_middleware;

/// Forwards an allowed JSON-RPC body to the upstream and relays its answer.
///
/// The upstream status, content type and body are returned as-is. Forwarding failures become
/// `502`/`504` with a sanitized message.
pub async fn handle_forward(
    State(upstream): State<Arc<UpstreamClient>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    match upstream.forward(body, content_type).await {
        Ok(upstream_response) => {
            let status =
                StatusCode::from_u16(upstream_response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut response = (status, upstream_response.body).into_response();

            response.headers_mut().remove(CONTENT_TYPE);
            if let Some(value) =
                upstream_response.content_type.and_then(|ct| HeaderValue::from_str(&ct).ok())
            {
                response.headers_mut().insert(CONTENT_TYPE, value);
            }

            response
        }
        Err(e) => {
            tracing::warn!(error = %e, upstream = upstream.url(), "upstream forwarding failed");
            let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, e.to_string()).into_response()
        }
    }
}

pub async fn handle_health() -> &'static str {
    "OK"
}

/// Builds the application router.
///
/// `POST /` runs through the method denylist before being forwarded; `GET /health` is not
/// filtered. Bodies are unbounded unless `max_body_bytes` is configured; the limit sits in front
/// of the filter, so a declared oversized body is answered with `413` before classification and
/// a stream that overruns it surfaces to the filter as a read failure.
pub fn create_app(
    filter: Arc<MethodFilter>,
    upstream: Arc<UpstreamClient>,
    server_config: &ServerConfig,
) -> Router {
    let public = Router::new().route("/health", get(handle_health));

    let mut rpc = Router::new()
        .route("/", post(handle_forward))
        .with_state(upstream)
        .layer(axum_middleware::from_fn_with_state(filter, method_denylist_middleware))
        .layer(DefaultBodyLimit::disable());

    if let Some(limit) = server_config.max_body_bytes {
        rpc = rpc.layer(RequestBodyLimitLayer::new(limit));
    }

    public.merge(rpc).layer(TraceLayer::new_for_http())
}
