//! Profile repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use tradepost_core::error::{AppError, ErrorKind};
use tradepost_core::result::AppResult;
use tradepost_entity::user::{Profile, UpdateProfile};

/// Repository for user profiles.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the profile of an account.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    /// Overwrite the editable profile fields.
    pub async fn update(&self, user_id: Uuid, data: &UpdateProfile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET first_name = $2, last_name = $3, company_name = $4, \
             affiliate_code = $5, updated_at = NOW() WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.company_name)
        .bind(&data.affiliate_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?
        .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Set the company verification flag.
    pub async fn set_verified(&self, user_id: Uuid, verified: bool) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET is_verified = $2, updated_at = NOW() \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(verified)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update verification", e)
        })?
        .ok_or_else(|| AppError::not_found("Profile not found"))
    }
}
