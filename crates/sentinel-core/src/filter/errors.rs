/// Errors raised while building a [`MethodFilter`](super::MethodFilter).
///
/// These are fatal: a filter that fails construction is never installed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No methods were configured for the denylist.
    #[error("blacklist empty")]
    EmptyDenylist,

    /// An API key is required by configuration but none (or a blank one) was given.
    #[error("api key empty")]
    MissingApiKey,
}

/// Reasons a request is refused before reaching the downstream handler.
///
/// The `Display` text of each variant is the exact response body written to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The request body could not be fully read into memory.
    #[error("can't clone request body")]
    BodyRead,

    /// The body is neither a call object nor an array of call objects.
    #[error("{0}")]
    MalformedPayload(String),

    /// A call in the body targets a denylisted method.
    #[error("method {0} is not allowed")]
    BlockedMethod(String),
}

impl Rejection {
    /// HTTP status code written for this rejection.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BodyRead => 500,
            Self::MalformedPayload(_) => 400,
            Self::BlockedMethod(_) => 405,
        }
    }
}
