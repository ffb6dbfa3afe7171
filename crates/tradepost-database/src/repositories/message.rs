//! Message repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use tradepost_core::error::{AppError, ErrorKind};
use tradepost_core::result::AppResult;
use tradepost_entity::message::{CreateMessage, Message, MessageDetail};

/// Repository for buyer/seller messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a message by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Message>> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find message", e))
    }

    /// Insert a message.
    pub async fn create(&self, data: &CreateMessage) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_id, recipient_id, listing_id, subject, content) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.sender_id)
        .bind(data.recipient_id)
        .bind(data.listing_id)
        .bind(&data.subject)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to send message", e))
    }

    /// Messages sent or received by a user, newest first.
    pub async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<MessageDetail>> {
        sqlx::query_as::<_, MessageDetail>(
            "SELECT m.*, l.title AS listing_title, \
             sp.first_name AS sender_first_name, sp.company_name AS sender_company_name, \
             rp.first_name AS recipient_first_name, rp.company_name AS recipient_company_name \
             FROM messages m \
             LEFT JOIN listings l ON l.id = m.listing_id \
             LEFT JOIN profiles sp ON sp.user_id = m.sender_id \
             LEFT JOIN profiles rp ON rp.user_id = m.recipient_id \
             WHERE m.sender_id = $1 OR m.recipient_id = $1 \
             ORDER BY m.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load messages", e))
    }

    /// Stamp `read_at` if the message is still unread.
    pub async fn mark_read(&self, id: Uuid) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "UPDATE messages SET read_at = COALESCE(read_at, NOW()) WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark message read", e))?
        .ok_or_else(|| AppError::not_found(format!("Message {id} not found")))
    }

    /// Number of unread messages received by a user.
    pub async fn count_unread_received(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE recipient_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count messages", e))
    }
}
