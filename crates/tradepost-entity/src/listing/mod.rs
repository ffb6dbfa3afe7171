//! Listing domain entities.

pub mod catalog;
pub mod model;
pub mod status;

pub use catalog::{Category, Condition};
pub use model::{
    AdminListing, CreateListing, Listing, ListingDetail, OwnedListing, UpdateListing,
};
pub use status::{DisplayStatus, ListingStatus};
