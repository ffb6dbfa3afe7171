//! Marketplace search handler.

use axum::Json;
use axum::extract::{Query, State};

use tradepost_service::listing::SearchResults;

use crate::dto::request::SearchParams;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/listings/search
pub async fn search_listings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchResults>>, ApiError> {
    let criteria = params.into_criteria(state.config.marketplace.default_max_price)?;
    let results = state.search_service.search(&auth, &criteria).await?;
    Ok(Json(ApiResponse::ok(results)))
}
