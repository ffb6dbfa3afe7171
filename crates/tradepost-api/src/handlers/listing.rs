//! Listing CRUD, status changes and the wizard step check.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use tradepost_core::error::AppError;
use tradepost_entity::listing::Listing;
use tradepost_service::listing::{ListingView, WizardStep};

use crate::dto::request::{ChangeStatusRequest, DeleteListingRequest, WizardValidateRequest};
use crate::dto::response::{ApiResponse, WizardStepResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ListingForm, ValidatedJson};
use crate::state::AppState;

/// POST /api/listings (multipart)
pub async fn create_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    form: ListingForm,
) -> Result<(StatusCode, Json<ApiResponse<Listing>>), ApiError> {
    let listing = state
        .listing_service
        .create(&auth, form.draft, form.photos)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(listing))))
}

/// GET /api/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ListingView>>, ApiError> {
    let view = state.listing_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/listings/{id} (multipart)
pub async fn update_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    form: ListingForm,
) -> Result<Json<ApiResponse<Listing>>, ApiError> {
    let listing = state
        .listing_service
        .update(&auth, id, form.draft, form.photos)
        .await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// DELETE /api/listings/{id}
pub async fn delete_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<DeleteListingRequest>,
) -> Result<Json<ApiResponse<Listing>>, ApiError> {
    let listing = state
        .listing_service
        .soft_delete(&auth, id, &req.reason)
        .await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// PUT /api/listings/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<ApiResponse<Listing>>, ApiError> {
    let listing = state
        .listing_service
        .change_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// POST /api/listings/wizard/validate
///
/// Evaluates one wizard step against the submitted draft.
pub async fn validate_step(
    _auth: AuthUser,
    Json(req): Json<WizardValidateRequest>,
) -> Result<Json<ApiResponse<WizardStepResponse>>, ApiError> {
    let step = WizardStep::from_number(req.step)
        .ok_or_else(|| AppError::validation(format!("Unknown wizard step: {}", req.step)))?;

    let missing = req.draft.missing_fields(step);
    let can_proceed = req.draft.can_proceed(step);
    Ok(Json(ApiResponse::ok(WizardStepResponse::new(
        step,
        can_proceed,
        missing,
    ))))
}
