//! Convenience result type alias for TradePost.

use crate::error::AppError;

/// A specialized `Result` type for TradePost operations.
pub type AppResult<T> = Result<T, AppError>;
