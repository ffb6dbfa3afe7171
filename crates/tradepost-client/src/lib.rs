//! # tradepost-client
//!
//! Thin JSON client for the TradePost HTTP API with a fixed base path and
//! request timeout. Used by the CLI to query a running server.

pub mod client;

pub use client::{ApiClient, DEFAULT_BASE_URL, REQUEST_TIMEOUT, SearchQuery};
