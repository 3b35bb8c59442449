//! # Sentinel Core
//!
//! Core library for the Sentinel JSON-RPC method denylist proxy.
//!
//! This crate provides the components that do not depend on an HTTP framework:
//!
//! - **[`filter`]**: Denylist construction, request body parsing (single call or batch) and the
//!   allow/reject decision.
//!
//! - **[`upstream`]**: The `reqwest` client that forwards allowed requests to the protected
//!   endpoint.
//!
//! - **[`config`]**: Layered TOML + environment configuration.
//!
//! ## Request Flow
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌──────────────┐
//! │ Buffer body  │ ─── Read error ──► 500
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │ MethodFilter │ ─── Malformed ──► 400
//! │  (classify)  │ ─── Blocked ────► 405
//! └──────┬───────┘
//!        │ Allow
//!        ▼
//! ┌────────────────┐
//! │ UpstreamClient │
//! └──────┬─────────┘
//!        │
//!        ▼
//!   Response to Client
//! ```

pub mod config;
pub mod filter;
pub mod upstream;
