//! Seller dashboard: own listings and headline numbers.

pub mod service;

pub use service::{Dashboard, DashboardListing, DashboardService, DashboardStats, compute_stats};
