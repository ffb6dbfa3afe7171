//! Core type definitions used across the TradePost workspace.

pub mod pagination;
pub mod response;
pub mod sorting;

pub use pagination::{PageRequest, PageResponse};
pub use response::ApiErrorResponse;
pub use sorting::ListingSort;
