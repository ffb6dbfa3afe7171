//! # tradepost-auth
//!
//! Authentication and authorization for the TradePost marketplace.
//!
//! ## Modules
//!
//! - `jwt` — access/refresh token creation and validation; tokens carry the
//!   holder's role set
//! - `password` — Argon2id password hashing and policy enforcement
//! - `rbac` — role-to-permission policies and enforcement over role sets

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{RbacEnforcer, RbacPolicies, SystemPermission};
