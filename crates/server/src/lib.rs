//! HTTP layer of the Sentinel proxy.
//!
//! - [`middleware`]: the axum adapter around `sentinel_core::filter`
//! - [`router`]: route table and the forwarding handler

pub mod middleware;
pub mod router;
