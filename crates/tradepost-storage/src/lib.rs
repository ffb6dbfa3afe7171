//! # tradepost-storage
//!
//! Object storage for TradePost. A local filesystem provider holds one
//! directory per bucket; [`ImageStore`] lays out and validates listing photos
//! inside the image bucket.

pub mod images;
pub mod providers;

pub use images::{ImageStore, StoredImage};
pub use providers::local::LocalStorageProvider;
