//! RBAC enforcement over a user's role set.

use tradepost_core::error::AppError;
use tradepost_entity::user::RoleSet;

use super::policies::{RbacPolicies, SystemPermission};

/// Enforces role-based access control for system-level operations.
///
/// A permission is granted when any held role grants it.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Returns `Err(Forbidden)` unless one of `roles` grants `permission`.
    pub fn require_permission(
        &self,
        roles: &RoleSet,
        permission: SystemPermission,
    ) -> Result<(), AppError> {
        if self.has_permission(roles, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Missing permission '{permission:?}'"
            )))
        }
    }

    pub fn has_permission(&self, roles: &RoleSet, permission: SystemPermission) -> bool {
        roles
            .iter()
            .any(|role| self.policies.has_permission(role, permission))
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}

#[cfg(test)]
mod tests {
    use tradepost_core::error::ErrorKind;
    use tradepost_entity::user::UserRole;

    use super::*;

    fn roles(list: &[UserRole]) -> RoleSet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_admin_has_everything() {
        let enforcer = RbacEnforcer::new();
        let admin = roles(&[UserRole::Admin]);
        for perm in [
            SystemPermission::ListingModerate,
            SystemPermission::UserRoleManage,
            SystemPermission::UserVerify,
            SystemPermission::CatalogManage,
        ] {
            assert!(enforcer.has_permission(&admin, perm));
        }
    }

    #[test]
    fn test_backoffice_moderates_only() {
        let enforcer = RbacEnforcer::new();
        let staff = roles(&[UserRole::Backoffice]);
        assert!(enforcer.has_permission(&staff, SystemPermission::ListingModerate));
        let err = enforcer
            .require_permission(&staff, SystemPermission::UserRoleManage)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_any_role_grants() {
        let enforcer = RbacEnforcer::new();
        let mixed = roles(&[UserRole::Client, UserRole::Backoffice]);
        assert!(enforcer.has_permission(&mixed, SystemPermission::ListingStatusChange));
        assert!(!enforcer.has_permission(&roles(&[UserRole::Client]), SystemPermission::UserRead));
        assert!(!enforcer.has_permission(&RoleSet::new(), SystemPermission::UserRead));
    }
}
