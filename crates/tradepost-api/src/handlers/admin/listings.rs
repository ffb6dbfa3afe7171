//! Listing moderation.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use tradepost_entity::listing::Listing;
use tradepost_service::admin::ModeratedListing;

use crate::dto::request::DisableListingRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require_staff;
use crate::state::AppState;

/// GET /api/admin/listings
pub async fn list_listings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ModeratedListing>>>, ApiError> {
    require_staff(&auth)?;
    let listings = state.admin_service.list_listings(&auth).await?;
    Ok(Json(ApiResponse::ok(listings)))
}

/// PUT /api/admin/listings/{id}/disabled
pub async fn set_disabled(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<DisableListingRequest>,
) -> Result<Json<ApiResponse<Listing>>, ApiError> {
    require_staff(&auth)?;
    let listing = state
        .admin_service
        .set_listing_disabled(&auth, id, req.disabled, req.reason.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(listing)))
}
