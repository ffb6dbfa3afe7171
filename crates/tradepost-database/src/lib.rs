//! # tradepost-database
//!
//! PostgreSQL connection management, the embedded migration runner and
//! concrete repositories for all TradePost entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
