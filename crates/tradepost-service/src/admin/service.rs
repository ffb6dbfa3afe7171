//! Administrative operations.
//!
//! User management requires the admin role; listing moderation is open to
//! back office staff as well.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use tradepost_auth::rbac::{RbacEnforcer, SystemPermission};
use tradepost_core::error::AppError;
use tradepost_core::result::AppResult;
use tradepost_database::repositories::{
    ListingRepository, ProfileRepository, RoleRepository, UserRepository,
};
use tradepost_entity::listing::{AdminListing, DisplayStatus, Listing, ListingStatus};
use tradepost_entity::user::{Profile, RoleAssignment, RoleSet, UserRole, UserWithProfile};

use crate::context::RequestContext;

/// A user row in the admin console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub is_verified: bool,
    pub roles: RoleSet,
    pub created_at: DateTime<Utc>,
}

/// Outcome of toggling one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleToggle {
    pub user_id: Uuid,
    pub role: UserRole,
    /// `true` if the role was granted, `false` if it was revoked.
    pub granted: bool,
    pub roles: RoleSet,
}

/// A listing row in the moderation console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeratedListing {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub status: ListingStatus,
    pub display_status: DisplayStatus,
    pub disabled_by_admin: bool,
    pub disabled_reason: Option<String>,
    pub deleted_by_user: bool,
    pub deletion_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AdminListing> for ModeratedListing {
    fn from(row: AdminListing) -> Self {
        let owner_name = row
            .owner_company_name
            .filter(|c| !c.trim().is_empty())
            .or(row.owner_first_name)
            .unwrap_or_else(|| "Unknown".to_string());
        let l = row.listing;
        Self {
            display_status: DisplayStatus::resolve(l.status, l.deleted_by_user, l.disabled_by_admin),
            owner_name,
            id: l.id,
            title: l.title,
            price: l.price,
            owner_id: l.user_id,
            status: l.status,
            disabled_by_admin: l.disabled_by_admin,
            disabled_reason: l.disabled_reason,
            deleted_by_user: l.deleted_by_user,
            deletion_reason: l.deletion_reason,
            created_at: l.created_at,
        }
    }
}

/// Join users with their role assignments.
pub fn attach_roles(users: Vec<UserWithProfile>, assignments: Vec<RoleAssignment>) -> Vec<AdminUser> {
    let mut by_user: HashMap<Uuid, RoleSet> = HashMap::new();
    for a in assignments {
        by_user.entry(a.user_id).or_default().insert(a.role);
    }

    users
        .into_iter()
        .map(|u| {
            let p = u.profile;
            AdminUser {
                roles: by_user.remove(&p.user_id).unwrap_or_default(),
                user_id: p.user_id,
                email: u.email,
                first_name: p.first_name,
                last_name: p.last_name,
                company_name: p.company_name,
                is_verified: p.is_verified,
                created_at: p.created_at,
            }
        })
        .collect()
}

/// Handles user administration and listing moderation.
#[derive(Debug, Clone)]
pub struct AdminService {
    user_repo: Arc<UserRepository>,
    profile_repo: Arc<ProfileRepository>,
    role_repo: Arc<RoleRepository>,
    listing_repo: Arc<ListingRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        profile_repo: Arc<ProfileRepository>,
        role_repo: Arc<RoleRepository>,
        listing_repo: Arc<ListingRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            role_repo,
            listing_repo,
            rbac,
        }
    }

    /// All users with their profiles and roles.
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<AdminUser>> {
        self.rbac
            .require_permission(&ctx.roles, SystemPermission::UserRead)?;
        let users = self.user_repo.list_with_profiles().await?;
        let assignments = self.role_repo.all_assignments().await?;
        Ok(attach_roles(users, assignments))
    }

    /// Grant `role` if the user lacks it, revoke it otherwise.
    ///
    /// Admins cannot take the admin role away from themselves.
    pub async fn toggle_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role: UserRole,
    ) -> AppResult<RoleToggle> {
        self.rbac
            .require_permission(&ctx.roles, SystemPermission::UserRoleManage)?;

        let current = self.role_repo.roles_for(user_id).await?;
        let granted = if current.has_role(role) {
            if user_id == ctx.user_id && role == UserRole::Admin {
                return Err(AppError::validation(
                    "You cannot remove your own admin role",
                ));
            }
            self.role_repo.revoke(user_id, role).await?;
            false
        } else {
            self.role_repo.grant(user_id, role).await?;
            true
        };

        let roles = self.role_repo.roles_for(user_id).await?;
        info!(
            admin = %ctx.user_id,
            user_id = %user_id,
            role = %role,
            granted,
            "Role toggled"
        );
        Ok(RoleToggle {
            user_id,
            role,
            granted,
            roles,
        })
    }

    /// Set a user's verified flag.
    pub async fn set_verification(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        verified: bool,
    ) -> AppResult<Profile> {
        self.rbac
            .require_permission(&ctx.roles, SystemPermission::UserVerify)?;
        let profile = self.profile_repo.set_verified(user_id, verified).await?;
        info!(admin = %ctx.user_id, user_id = %user_id, verified, "Verification updated");
        Ok(profile)
    }

    /// Every listing, including hidden and deleted ones.
    pub async fn list_listings(&self, ctx: &RequestContext) -> AppResult<Vec<ModeratedListing>> {
        self.rbac
            .require_permission(&ctx.roles, SystemPermission::ListingModerate)?;
        let rows = self.listing_repo.find_all_for_moderation().await?;
        Ok(rows.into_iter().map(ModeratedListing::from).collect())
    }

    /// Hide or restore a listing. Restoring clears the reason.
    pub async fn set_listing_disabled(
        &self,
        ctx: &RequestContext,
        listing_id: Uuid,
        disabled: bool,
        reason: Option<&str>,
    ) -> AppResult<Listing> {
        self.rbac
            .require_permission(&ctx.roles, SystemPermission::ListingModerate)?;

        let reason = if disabled {
            reason.map(str::trim).filter(|r| !r.is_empty())
        } else {
            None
        };
        let listing = self
            .listing_repo
            .set_disabled(listing_id, disabled, reason)
            .await?;

        info!(
            moderator = %ctx.user_id,
            listing_id = %listing_id,
            disabled,
            "Listing moderation updated"
        );
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Uuid, email: &str) -> UserWithProfile {
        UserWithProfile {
            profile: Profile {
                user_id: id,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                company_name: None,
                affiliate_code: None,
                is_verified: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            email: email.to_string(),
        }
    }

    fn assignment(user_id: Uuid, role: UserRole) -> RoleAssignment {
        RoleAssignment {
            user_id,
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_attach_roles_groups_by_user() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let users = attach_roles(
            vec![user(a, "a@test.com"), user(b, "b@test.com")],
            vec![
                assignment(a, UserRole::Admin),
                assignment(a, UserRole::Client),
                assignment(b, UserRole::Visitor),
            ],
        );

        assert_eq!(users.len(), 2);
        assert!(users[0].roles.is_admin());
        assert!(users[0].roles.is_client());
        assert_eq!(users[1].roles.len(), 1);
        assert!(users[1].roles.is_visitor());
    }

    #[test]
    fn test_user_without_assignments_has_no_roles() {
        let users = attach_roles(vec![user(Uuid::new_v4(), "x@test.com")], vec![]);
        assert!(users[0].roles.is_empty());
    }
}
