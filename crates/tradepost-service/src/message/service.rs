//! Sending, listing and reading messages.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use tradepost_core::error::AppError;
use tradepost_core::result::AppResult;
use tradepost_database::repositories::{ListingRepository, MessageRepository};
use tradepost_entity::message::{CreateMessage, Message};

use super::inbox::{InboxMessage, build_inbox};
use crate::context::RequestContext;
use crate::listing::view::can_view;

/// Handles messages between buyers and sellers.
#[derive(Debug, Clone)]
pub struct MessageService {
    message_repo: Arc<MessageRepository>,
    listing_repo: Arc<ListingRepository>,
    preview_length: usize,
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(
        message_repo: Arc<MessageRepository>,
        listing_repo: Arc<ListingRepository>,
        preview_length: usize,
    ) -> Self {
        Self {
            message_repo,
            listing_repo,
            preview_length,
        }
    }

    /// Send a message to the seller of `listing_id`.
    ///
    /// A blank subject becomes `Interest in: {title}`.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        listing_id: Uuid,
        subject: Option<&str>,
        content: &str,
    ) -> AppResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Please enter a message"));
        }

        let listing = self
            .listing_repo
            .find_by_id(listing_id)
            .await?
            .filter(|l| can_view(l, ctx))
            .ok_or_else(|| AppError::not_found("Listing not found"))?;

        if listing.is_owned_by(ctx.user_id) {
            return Err(AppError::validation("You cannot message yourself"));
        }

        let subject = subject
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Interest in: {}", listing.title));

        let message = self
            .message_repo
            .create(&CreateMessage {
                sender_id: ctx.user_id,
                recipient_id: listing.user_id,
                listing_id,
                subject,
                content: content.to_string(),
            })
            .await?;

        info!(
            message_id = %message.id,
            listing_id = %listing_id,
            sender = %ctx.user_id,
            "Message sent"
        );
        Ok(message)
    }

    /// Messages sent or received by the caller, newest first.
    pub async fn inbox(&self, ctx: &RequestContext) -> AppResult<Vec<InboxMessage>> {
        let rows = self.message_repo.find_for_user(ctx.user_id).await?;
        Ok(build_inbox(rows, ctx.user_id, self.preview_length))
    }

    /// Mark a received message as read.
    pub async fn mark_read(&self, ctx: &RequestContext, message_id: Uuid) -> AppResult<Message> {
        let message = self
            .message_repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::not_found("Message not found"))?;

        if message.recipient_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the recipient can mark a message as read",
            ));
        }
        if message.read_at.is_some() {
            return Ok(message);
        }
        self.message_repo.mark_read(message_id).await
    }

    /// Number of unread messages addressed to the caller.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.message_repo.count_unread_received(ctx.user_id).await
    }
}
