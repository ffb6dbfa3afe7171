//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use tradepost_entity::user::UserRole;

/// A system-level permission. Ownership checks on individual listings and
/// messages are handled by the services, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPermission {
    /// See and act on any listing regardless of visibility.
    ListingModerate,
    /// Change the status of listings owned by others.
    ListingStatusChange,
    /// List accounts and their roles.
    UserRead,
    /// Grant and revoke roles.
    UserRoleManage,
    /// Toggle the verified flag on a profile.
    UserVerify,
    /// Create categories and conditions.
    CatalogManage,
}

/// Defines the mapping from each role to its set of allowed system permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<UserRole, HashSet<SystemPermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Members hold no system permissions; they act on what they own.
        policies.insert(UserRole::Visitor, HashSet::new());
        policies.insert(UserRole::Client, HashSet::new());

        // Back office: listing moderation only
        let backoffice: HashSet<SystemPermission> = [
            SystemPermission::ListingModerate,
            SystemPermission::ListingStatusChange,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Backoffice, backoffice);

        // Admin: everything
        let admin: HashSet<SystemPermission> = [
            SystemPermission::ListingModerate,
            SystemPermission::ListingStatusChange,
            SystemPermission::UserRead,
            SystemPermission::UserRoleManage,
            SystemPermission::UserVerify,
            SystemPermission::CatalogManage,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Admin, admin);

        Self { policies }
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: UserRole) -> HashSet<SystemPermission> {
        self.policies.get(&role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: UserRole, permission: SystemPermission) -> bool {
        self.policies
            .get(&role)
            .is_some_and(|perms| perms.contains(&permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
