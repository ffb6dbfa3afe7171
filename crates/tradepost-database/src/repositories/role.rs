//! Role assignment repository.

use sqlx::PgPool;
use uuid::Uuid;

use tradepost_core::error::{AppError, ErrorKind};
use tradepost_core::result::AppResult;
use tradepost_entity::user::{RoleAssignment, RoleSet, UserRole};

/// Repository for the `user_roles` table.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Roles held by a user.
    pub async fn roles_for(&self, user_id: Uuid) -> AppResult<RoleSet> {
        let roles: Vec<UserRole> =
            sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load user roles", e)
                })?;
        Ok(roles.into_iter().collect())
    }

    /// Every role assignment in the system.
    pub async fn all_assignments(&self) -> AppResult<Vec<RoleAssignment>> {
        sqlx::query_as::<_, RoleAssignment>("SELECT * FROM user_roles ORDER BY user_id, role")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list role assignments", e)
            })
    }

    /// Grant a role. Returns `false` when the user already held it.
    pub async fn grant(&self, user_id: Uuid, role: UserRole) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("user_roles_user_id_fkey") =>
            {
                AppError::not_found(format!("User {user_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to grant role", e),
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke a role. Returns `false` when the user did not hold it.
    pub async fn revoke(&self, user_id: Uuid, role: UserRole) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role = $2")
            .bind(user_id)
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke role", e))?;
        Ok(result.rows_affected() > 0)
    }
}
