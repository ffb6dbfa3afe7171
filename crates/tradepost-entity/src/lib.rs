//! # tradepost-entity
//!
//! Domain entity models for the TradePost marketplace. Every struct in this
//! crate represents a database table row, a joined read model, or a domain
//! value object. Database entities derive `sqlx::FromRow`.

pub mod listing;
pub mod message;
pub mod user;
