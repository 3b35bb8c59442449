//! JSON-RPC method denylist filtering.
//!
//! This module is the **business logic layer** of the filter. The HTTP adapter (body
//! buffering, status codes, the axum middleware function) lives in
//! `crates/server/src/middleware`, while this module decides what happens to a request body.
//!
//! # Pipeline
//!
//! ```text
//!   Incoming Request
//!        │
//!        ▼
//!   ┌─────────────────────────┐
//!   │  1. BODY DUPLICATION    │  server::middleware::duplicate_request()
//!   │     - buffer all bytes  │  - inspection copy
//!   │     - restore original  │  - forwardable original
//!   └─────────────────────────┘
//!        │ read failure?
//!        ├─> 500 "can't clone request body"
//!        │
//!        ▼
//!   ┌─────────────────────────┐
//!   │  2. CLASSIFICATION      │  MethodFilter::classify()
//!   │     - single object     │  - Payload::parse()
//!   │     - or batch array    │  - first denylisted call wins
//!   └─────────────────────────┘
//!        │ Malformed?  ├─> 400 (parse error text)
//!        │ Blocked?    ├─> 405 "method <name> is not allowed"
//!        │
//!        ▼
//!   ┌─────────────────────────┐
//!   │  3. DOWNSTREAM HANDLER  │  original request, body restored byte-for-byte
//!   └─────────────────────────┘
//! ```
//!
//! # Matching
//!
//! The comparison rule is an explicit [`MatchPolicy`]. `normalized` (the default) lower-cases
//! and trims both the configured entries and incoming names; `exact` compares bytes.
//!
//! # Example
//!
//! ```rust
//! use sentinel_core::filter::{Decision, FilterConfig, MethodFilter, Rejection};
//!
//! let config = FilterConfig::new(["eth_sendTransaction"]);
//! let filter = MethodFilter::new(&config).unwrap();
//!
//! assert_eq!(filter.classify(br#"{"method":"eth_call"}"#), Decision::Allow);
//! assert_eq!(
//!     filter.classify(br#"[{"method":"eth_call"},{"method":"ETH_SENDTRANSACTION"}]"#),
//!     Decision::Reject(Rejection::BlockedMethod("ETH_SENDTRANSACTION".to_string())),
//! );
//! ```

pub mod classifier;
pub mod denylist;
pub mod errors;

pub use classifier::{Decision, Payload, RpcCall};
pub use denylist::{Denylist, MatchPolicy};
pub use errors::{ConfigError, Rejection};

use serde::{Deserialize, Serialize};

/// Construction input for a [`MethodFilter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Method names to reject. Must not be empty.
    #[serde(default)]
    pub denylist: Vec<String>,

    /// Credential carried alongside the filter settings. Never consulted while filtering.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Refuse to build the filter without a non-blank `api_key`. Defaults to `false`.
    #[serde(default)]
    pub require_api_key: bool,

    /// How method names are compared. Defaults to `normalized`.
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

impl FilterConfig {
    /// Creates a config with the given denylist and default settings for everything else.
    pub fn new<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { denylist: denylist.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    #[must_use]
    pub fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_required_api_key(mut self, require_api_key: bool) -> Self {
        self.require_api_key = require_api_key;
        self
    }

    /// Checks the construction invariants without building the set.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyDenylist`] if no methods are configured
    /// - [`ConfigError::MissingApiKey`] if a key is required but missing or blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.denylist.is_empty() {
            return Err(ConfigError::EmptyDenylist);
        }

        if self.require_api_key && self.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(())
    }
}

/// A built, immutable method filter.
///
/// Share it across requests behind an `Arc`; nothing in it is mutated after construction.
#[derive(Debug, Clone)]
pub struct MethodFilter {
    denylist: Denylist,
}

impl MethodFilter {
    /// Builds the filter from its configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when [`FilterConfig::validate`] fails.
    pub fn new(config: &FilterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let denylist = Denylist::new(&config.denylist, config.match_policy);
        tracing::debug!(
            methods = denylist.distinct_methods(),
            match_policy = %denylist.policy(),
            "method filter initialized"
        );

        Ok(Self { denylist })
    }

    /// Classifies a fully buffered request body. Pure and synchronous.
    #[must_use]
    pub fn classify(&self, body: &[u8]) -> Decision {
        classifier::classify(&self.denylist, body)
    }

    #[must_use]
    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }
}
