//! Response DTOs.

use serde::{Deserialize, Serialize};

use tradepost_service::listing::WizardStep;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of `GET /api/version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub storage: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Wizard evaluation of one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardStepResponse {
    pub step: u8,
    pub title: String,
    pub can_proceed: bool,
    /// Step reached by `next`, or `None` on the last step.
    pub next_step: Option<u8>,
    pub missing_fields: Vec<String>,
}

impl WizardStepResponse {
    pub fn new(step: WizardStep, can_proceed: bool, missing_fields: Vec<&'static str>) -> Self {
        Self {
            step: step.number(),
            title: step.title().to_string(),
            can_proceed,
            next_step: if can_proceed {
                step.next().map(WizardStep::number)
            } else {
                None
            },
            missing_fields: missing_fields.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Unread message counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}
