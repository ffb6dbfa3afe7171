//! Admin console handlers.

pub mod catalog;
pub mod listings;
pub mod users;
