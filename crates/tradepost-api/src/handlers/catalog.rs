//! Category and condition lookups.

use axum::Json;
use axum::extract::State;

use tradepost_entity::listing::{Category, Condition};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/catalog/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.catalog_service.categories().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/catalog/conditions
pub async fn list_conditions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Condition>>>, ApiError> {
    let conditions = state.catalog_service.conditions().await?;
    Ok(Json(ApiResponse::ok(conditions)))
}
