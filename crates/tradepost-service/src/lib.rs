//! # tradepost-service
//!
//! Business logic service layer for TradePost. Each service orchestrates
//! repositories, the image store and the auth primitives to implement one
//! area of the marketplace.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. The pure parts (listing wizard,
//! search filtering, inbox and dashboard shaping) are plain functions so they
//! can be tested without a database.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod context;
pub mod dashboard;
pub mod listing;
pub mod message;
pub mod user;

pub use admin::AdminService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use context::RequestContext;
pub use dashboard::DashboardService;
pub use listing::{ListingService, SearchService};
pub use message::MessageService;
pub use user::ProfileService;
