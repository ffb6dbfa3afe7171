//! Current role lookup for authenticated requests.
//!
//! Access tokens carry the roles held at sign-in, but grants and revocations
//! must apply on the very next request, so the HTTP layer asks a
//! [`RoleSource`] for the live set instead of trusting the claims.

use async_trait::async_trait;
use uuid::Uuid;

use tradepost_core::result::AppResult;
use tradepost_database::repositories::RoleRepository;
use tradepost_entity::user::RoleSet;

/// Resolves the roles a user holds right now.
#[async_trait]
pub trait RoleSource: Send + Sync + std::fmt::Debug + 'static {
    /// Roles currently assigned to `user_id`. Unknown users hold none.
    async fn current_roles(&self, user_id: Uuid) -> AppResult<RoleSet>;
}

#[async_trait]
impl RoleSource for RoleRepository {
    async fn current_roles(&self, user_id: Uuid) -> AppResult<RoleSet> {
        self.roles_for(user_id).await
    }
}
