use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, ClientBuilder};
use std::time::Duration;

use crate::{config::UpstreamConfig, upstream::UpstreamError};

/// Response relayed back from the upstream endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// HTTP client that forwards allowed request bodies to a single upstream URL.
///
/// Bodies are sent exactly as received. Requests are never retried: a JSON-RPC call such as
/// `eth_sendRawTransaction` is not safe to replay.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    url: String,
}

impl UpstreamClient {
    /// Builds the client from upstream configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Configuration`] if the underlying reqwest client fails to build.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let timeout = config.timeout();

        let client = ClientBuilder::new()
            .pool_idle_timeout(Duration::from_secs(30))
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("sentinel/", env!("CARGO_PKG_VERSION")))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to build http client");
                UpstreamError::Configuration(format!("HTTP client build failed: {e}"))
            })?;

        Ok(Self { client, url: config.url.clone() })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reduces a reqwest error to a short category so upstream details are not leaked to clients.
    fn sanitize_network_error(error: &reqwest::Error) -> String {
        if error.is_connect() {
            "connection refused or unreachable".to_string()
        } else if error.is_request() {
            "request failed".to_string()
        } else if error.is_body() {
            "response body error".to_string()
        } else if error.is_redirect() {
            "too many redirects".to_string()
        } else {
            "network error".to_string()
        }
    }

    /// POSTs `body` to the upstream and returns whatever it answers, including non-2xx statuses.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Timeout`] if the request exceeds the configured timeout
    /// - [`UpstreamError::ConnectionFailed`] for other network failures
    /// - [`UpstreamError::InvalidResponse`] if the response body cannot be read
    pub async fn forward(
        &self,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, content_type.unwrap_or("application/json"))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(url = %self.url, error = %e, "upstream request failed");
                if e.is_timeout() {
                    UpstreamError::Timeout
                } else {
                    UpstreamError::ConnectionFailed(Self::sanitize_network_error(&e))
                }
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::InvalidResponse(Self::sanitize_network_error(&e))
            }
        })?;

        tracing::trace!(status, bytes = body.len(), "upstream response received");

        Ok(UpstreamResponse { status, content_type, body })
    }
}
