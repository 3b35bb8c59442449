//! Integration Tests for the Sentinel JSON-RPC Method Filter
//!
//! This crate drives the complete router (method filter in front of the forwarding handler)
//! against a mocked upstream:
//!
//! - `filter_chain_tests`: Allowed requests reach the upstream byte-for-byte, rejected ones never do
//! - `forwarding_tests`: Upstream statuses, bodies and failures are relayed to the client
//! - `adversarial_tests`: Hostile or odd payload shapes and their classification
//! - `mock_infrastructure`: Reusable upstream mock and request helpers
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package tests
//! ```

#[cfg(test)]
mod filter_chain_tests;

#[cfg(test)]
mod forwarding_tests;


pub mod mock_infrastructure;
