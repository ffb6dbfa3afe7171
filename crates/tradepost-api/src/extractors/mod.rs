//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod listing_form;

pub use auth::AuthUser;
pub use json::ValidatedJson;
pub use listing_form::ListingForm;
