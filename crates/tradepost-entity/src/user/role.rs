//! Marketplace roles and role sets.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Roles a user can hold. A user may hold several at once.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrator: users, roles, catalog and moderation.
    Admin,
    /// Staff that moderates listings.
    Backoffice,
    /// Trading member that publishes listings and sends messages.
    Client,
    /// Registered account with browse-only intent.
    Visitor,
}

impl UserRole {
    /// All roles, most privileged first.
    pub const ALL: [UserRole; 4] = [Self::Admin, Self::Backoffice, Self::Client, Self::Visitor];

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Backoffice => "backoffice",
            Self::Client => "client",
            Self::Visitor => "visitor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = tradepost_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "backoffice" => Ok(Self::Backoffice),
            "client" => Ok(Self::Client),
            "visitor" => Ok(Self::Visitor),
            _ => Err(tradepost_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, backoffice, client, visitor"
            ))),
        }
    }
}

/// A row of the `user_roles` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleAssignment {
    /// The user holding the role.
    pub user_id: Uuid,
    /// The granted role.
    pub role: UserRole,
    /// When the role was granted.
    pub created_at: DateTime<Utc>,
}

/// The set of roles held by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<UserRole>);

impl RoleSet {
    /// Empty role set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set contains `role`.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.0.contains(&role)
    }

    /// Add a role. Returns `false` if it was already present.
    pub fn insert(&mut self, role: UserRole) -> bool {
        self.0.insert(role)
    }

    /// Remove a role. Returns `false` if it was absent.
    pub fn remove(&mut self, role: UserRole) -> bool {
        self.0.remove(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    pub fn is_backoffice(&self) -> bool {
        self.has_role(UserRole::Backoffice)
    }

    pub fn is_client(&self) -> bool {
        self.has_role(UserRole::Client)
    }

    pub fn is_visitor(&self) -> bool {
        self.has_role(UserRole::Visitor)
    }

    /// Only administrators manage accounts and roles.
    pub fn can_manage_users(&self) -> bool {
        self.is_admin()
    }

    /// Administrators and back office staff moderate listings.
    pub fn can_manage_listings(&self) -> bool {
        self.is_admin() || self.is_backoffice()
    }

    /// Iterate roles in privilege order.
    pub fn iter(&self) -> impl Iterator<Item = UserRole> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<UserRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = UserRole>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("BackOffice".parse::<UserRole>().unwrap(), UserRole::Backoffice);
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_capabilities() {
        let staff: RoleSet = [UserRole::Backoffice, UserRole::Client].into_iter().collect();
        assert!(staff.can_manage_listings());
        assert!(!staff.can_manage_users());

        let admin: RoleSet = [UserRole::Admin].into_iter().collect();
        assert!(admin.can_manage_users());
        assert!(admin.can_manage_listings());

        let visitor: RoleSet = [UserRole::Visitor].into_iter().collect();
        assert!(!visitor.can_manage_listings());
        assert!(visitor.is_visitor());
    }

    #[test]
    fn test_serializes_as_array() {
        let roles: RoleSet = [UserRole::Client, UserRole::Admin].into_iter().collect();
        let json = serde_json::to_string(&roles).unwrap();
        assert_eq!(json, r#"["admin","client"]"#);
    }
}
