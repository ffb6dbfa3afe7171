//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A message about a listing, sent from a buyer to its seller (or back).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    /// The listing the conversation is about.
    pub listing_id: Uuid,
    pub subject: String,
    pub content: String,
    /// When the recipient opened the message.
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether the message is still unread.
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}

/// Data required to insert a message.
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub listing_id: Uuid,
    pub subject: String,
    pub content: String,
}

/// A message joined with the names needed to render an inbox row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub message: Message,
    pub listing_title: Option<String>,
    pub sender_first_name: Option<String>,
    pub sender_company_name: Option<String>,
    pub recipient_first_name: Option<String>,
    pub recipient_company_name: Option<String>,
}
