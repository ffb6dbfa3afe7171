//! Buyer/seller messaging entities.

pub mod model;

pub use model::{CreateMessage, Message, MessageDetail};
