//! Self-service profile operations.

pub mod profile;

pub use profile::{ProfileService, ProfileUpdate};
