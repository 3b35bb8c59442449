//! Forwarding of allowed requests to the protected JSON-RPC endpoint.

pub mod errors;
pub mod http_client;

pub use errors::UpstreamError;
pub use http_client::{UpstreamClient, UpstreamResponse};
