//! Seller dashboard handler.

use axum::Json;
use axum::extract::State;

use tradepost_service::dashboard::Dashboard;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let dashboard = state.dashboard_service.load(&auth).await?;
    Ok(Json(ApiResponse::ok(dashboard)))
}
