//! # tradepost-api
//!
//! HTTP API layer for TradePost built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, compression, request
//! logging, body limit), extractors, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
