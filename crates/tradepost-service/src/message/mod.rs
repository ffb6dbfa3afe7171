//! Buyer/seller messaging about listings.

pub mod inbox;
pub mod service;

pub use inbox::{InboxMessage, build_inbox, participant_name, preview};
pub use service::MessageService;
