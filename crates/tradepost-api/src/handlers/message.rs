//! Messaging handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use tradepost_entity::message::Message;
use tradepost_service::message::InboxMessage;

use crate::dto::request::SendMessageRequest;
use crate::dto::response::{ApiResponse, UnreadCountResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), ApiError> {
    let message = state
        .message_service
        .send(&auth, req.listing_id, req.subject.as_deref(), &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

/// GET /api/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<InboxMessage>>>, ApiError> {
    let inbox = state.message_service.inbox(&auth).await?;
    Ok(Json(ApiResponse::ok(inbox)))
}

/// GET /api/messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UnreadCountResponse>>, ApiError> {
    let unread = state.message_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(UnreadCountResponse { unread })))
}

/// PUT /api/messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Message>>, ApiError> {
    let message = state.message_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(message)))
}
