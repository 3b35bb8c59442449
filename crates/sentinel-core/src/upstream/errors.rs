use thiserror::Error;

/// Errors from forwarding an allowed request to the upstream endpoint.
///
/// Messages are safe to return to clients: network failures are reduced to a short category
/// before they are wrapped.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Request exceeded the configured timeout duration.
    #[error("Request timeout")]
    Timeout,

    /// Failed to establish a connection to the upstream endpoint.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The upstream answered but its body could not be read.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be built from configuration.
    #[error("Client configuration error: {0}")]
    Configuration(String),
}

impl UpstreamError {
    /// HTTP status a proxy should answer with when forwarding fails.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Timeout => 504,
            Self::ConnectionFailed(_) | Self::InvalidResponse(_) => 502,
            Self::Configuration(_) => 500,
        }
    }
}
