//! Admin console: users, roles, verification and listing moderation.

pub mod service;

pub use service::{AdminService, AdminUser, ModeratedListing, RoleToggle, attach_roles};
