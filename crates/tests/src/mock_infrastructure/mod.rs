//! Mock Infrastructure for Testing the Sentinel Proxy
//!
//! Reusable pieces for driving the full router against a fake JSON-RPC upstream without a real
//! node.
//!
//! ## Components
//!
//! - `UpstreamMockBuilder`: Wraps mockito to stand in for the protected JSON-RPC endpoint
//! - Test helpers for building the app and sending requests through it
//!
//! ## Usage
//!
//! ```ignore
//! use tests::mock_infrastructure::{build_app, post_rpc, UpstreamMockBuilder};
//!
//! let mut upstream = UpstreamMockBuilder::new().await;
//! upstream.mock_echo(r#"{"method":"eth_call"}"#);
//!
//! let app = build_app(&["eth_sign"], &upstream.url());
//! let response = post_rpc(app, r#"{"method":"eth_call"}"#).await;
//! ```

pub mod test_helpers;

pub use rpc_mock::UpstreamMockBuilder;
pub use test_helpers::*;
