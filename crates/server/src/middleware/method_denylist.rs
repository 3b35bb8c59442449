use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use sentinel_core::filter::{Decision, MethodFilter, Rejection};
use std::sync::Arc;

/// Buffers the request body and returns two requests over the same bytes.
///
/// The first element is the original request with its body replaced by a fresh stream, ready
/// to be forwarded. The second is an independent inspection copy carrying the method, URI,
/// version, headers and the buffered body. The body size is not bounded here; put a
/// `RequestBodyLimitLayer` in front of the middleware to cap it.
///
/// # Errors
///
/// Returns [`Rejection::BodyRead`] if the body stream fails before it is fully read.
pub async fn duplicate_request(
    request: Request<Body>,
) -> Result<(Request<Body>, Request<Bytes>), Rejection> {
    let (parts, body) = request.into_parts();

    let bytes = axum::body::to_bytes(body, usize::MAX).await.map_err(|e| {
        tracing::debug!(error = %e, "failed to buffer request body");
        Rejection::BodyRead
    })?;

    let mut inspection = Request::new(bytes.clone());
    *inspection.method_mut() = parts.method.clone();
    *inspection.uri_mut() = parts.uri.clone();
    *inspection.version_mut() = parts.version;
    *inspection.headers_mut() = parts.headers.clone();

    Ok((Request::from_parts(parts, Body::from(bytes)), inspection))
}

/// Turns a [`Rejection`] into the plain-text response written to the client.
#[must_use]
pub fn rejection_response(rejection: &Rejection) -> Response {
    let status =
        StatusCode::from_u16(rejection.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, rejection.to_string()).into_response()
}

/// Axum middleware function that rejects requests calling denylisted JSON-RPC methods.
///
/// The body is buffered, classified against the shared [`MethodFilter`], and either answered
/// directly (500 on read failure, 400 on a malformed payload, 405 on a denylisted method) or
/// passed to the next handler with the original bytes restored. Nothing is retried.
pub async fn method_denylist_middleware(
    State(filter): State<Arc<MethodFilter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (request, inspection) = match duplicate_request(request).await {
        Ok(pair) => pair,
        Err(rejection) => return rejection_response(&rejection),
    };

    match filter.classify(inspection.body()) {
        Decision::Allow => next.run(request).await,
        Decision::Reject(rejection) => {
            tracing::debug!(
                status = rejection.status_code(),
                reason = %rejection,
                "request rejected by method filter"
            );
            rejection_response(&rejection)
        }
    }
}
