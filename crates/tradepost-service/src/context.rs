//! Request context carrying the authenticated user and their roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_entity::user::RoleSet;

/// Context for the current authenticated request.
///
/// Built from the access token by the API layer and passed into service
/// methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Login email from the token.
    pub email: String,
    /// Roles held when the token was issued.
    pub roles: RoleSet,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, roles: RoleSet) -> Self {
        Self {
            user_id,
            email,
            roles,
            request_time: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    /// Admins and back office staff.
    pub fn can_manage_listings(&self) -> bool {
        self.roles.can_manage_listings()
    }
}
