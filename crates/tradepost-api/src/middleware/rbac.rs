//! RBAC helpers for role-based route guarding.
//!
//! Services enforce permissions themselves; these checks reject early at the
//! handler so admin routes answer 403 before any work is done.

use tradepost_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.roles.can_manage_users() {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}

/// Checks that the authenticated user is admin or back office staff.
pub fn require_staff(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.roles.can_manage_listings() {
        return Err(AppError::forbidden("Admin or back office access required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_entity::user::{RoleSet, UserRole};
    use tradepost_service::context::RequestContext;
    use uuid::Uuid;

    fn user(roles: &[UserRole]) -> AuthUser {
        let roles: RoleSet = roles.iter().copied().collect();
        AuthUser(RequestContext::new(Uuid::new_v4(), "u@test.com".to_string(), roles))
    }

    #[test]
    fn test_backoffice_is_staff_but_not_admin() {
        let staff = user(&[UserRole::Backoffice]);
        assert!(require_staff(&staff).is_ok());
        assert!(require_admin(&staff).is_err());
    }

    #[test]
    fn test_client_is_neither() {
        let client = user(&[UserRole::Client, UserRole::Visitor]);
        assert!(require_staff(&client).is_err());
        assert!(require_admin(&client).is_err());
        assert!(require_admin(&user(&[UserRole::Admin])).is_ok());
    }
}
