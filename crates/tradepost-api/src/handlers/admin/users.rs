//! User administration: listing, role toggles, verification.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use tradepost_entity::user::{Profile, UserRole};
use tradepost_service::admin::{AdminUser, RoleToggle};

use crate::dto::request::VerificationRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AdminUser>>>, ApiError> {
    require_admin(&auth)?;
    let users = state.admin_service.list_users(&auth).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /api/admin/users/{id}/roles/{role}
pub async fn toggle_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((user_id, role)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<RoleToggle>>, ApiError> {
    require_admin(&auth)?;
    let role: UserRole = role.parse()?;
    let toggle = state.admin_service.toggle_role(&auth, user_id, role).await?;
    Ok(Json(ApiResponse::ok(toggle)))
}

/// PUT /api/admin/users/{id}/verification
pub async fn set_verification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<VerificationRequest>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    require_admin(&auth)?;
    let profile = state
        .admin_service
        .set_verification(&auth, user_id, req.verified)
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}
