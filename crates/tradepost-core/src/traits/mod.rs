//! Core traits defined in `tradepost-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
