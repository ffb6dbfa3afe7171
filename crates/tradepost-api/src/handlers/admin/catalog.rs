//! Catalog maintenance.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tradepost_entity::listing::{Category, Condition};

use crate::dto::request::CatalogEntryRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CatalogEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    require_admin(&auth)?;
    let category = state
        .catalog_service
        .create_category(&auth, &req.name, req.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// POST /api/admin/conditions
pub async fn create_condition(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CatalogEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Condition>>), ApiError> {
    require_admin(&auth)?;
    let condition = state
        .catalog_service
        .create_condition(&auth, &req.name, req.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(condition))))
}
