//! Profile viewing, editing and password changes.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use tradepost_auth::password::{PasswordHasher, PasswordValidator};
use tradepost_core::error::AppError;
use tradepost_core::result::AppResult;
use tradepost_database::repositories::{ProfileRepository, UserRepository};
use tradepost_entity::user::{Profile, UpdateProfile};

use crate::context::RequestContext;

/// Editable profile fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub affiliate_code: Option<String>,
}

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct ProfileService {
    user_repo: Arc<UserRepository>,
    profile_repo: Arc<ProfileRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        profile_repo: Arc<ProfileRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            hasher,
            validator,
        }
    }

    /// Gets the current user's profile.
    pub async fn get(&self, ctx: &RequestContext) -> AppResult<Profile> {
        self.profile_repo
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update(&self, ctx: &RequestContext, req: ProfileUpdate) -> AppResult<Profile> {
        let first_name = req.first_name.trim();
        let last_name = req.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(AppError::validation("First and last name cannot be empty"));
        }

        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };

        let profile = self
            .profile_repo
            .update(
                ctx.user_id,
                &UpdateProfile {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    company_name: clean(req.company_name),
                    affiliate_code: clean(req.affiliate_code),
                },
            )
            .await?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(profile)
    }

    /// Changes the current user's password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let account = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self
            .hasher
            .verify_password(current_password, &account.password_hash)?
        {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        self.validator
            .validate_not_same(current_password, new_password)?;
        self.validator
            .validate(new_password, &[account.email.as_str()])?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(ctx.user_id, &new_hash).await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }
}
