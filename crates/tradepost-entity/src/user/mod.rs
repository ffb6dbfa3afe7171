//! User domain entities.

pub mod model;
pub mod profile;
pub mod role;

pub use model::{CreateUser, UserAccount};
pub use profile::{CreateProfile, Profile, UpdateProfile, UserWithProfile};
pub use role::{RoleAssignment, RoleSet, UserRole};
