//! HTTP middleware components for the proxy server.
//!
//! These are Axum adapters around the business logic in `sentinel_core::filter`. They handle
//! HTTP-specific concerns (body buffering, status codes) and delegate the allow/reject decision
//! to the core library.

pub mod method_denylist;

pub use method_denylist::{duplicate_request, method_denylist_middleware, rejection_response};
