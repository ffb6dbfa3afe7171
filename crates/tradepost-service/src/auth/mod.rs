//! Registration, login and token refresh.

pub mod roles;
pub mod service;

pub use roles::RoleSource;
pub use service::{AuthService, AuthSession, Registration, UserSummary};
