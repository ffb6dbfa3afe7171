//! Shaping stored messages into inbox rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_entity::message::MessageDetail;

/// One row of a user's inbox, seen from that user's side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxMessage {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub listing_title: String,
    pub subject: String,
    pub content: String,
    /// Shortened content for list views.
    pub preview: String,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub recipient_id: Uuid,
    pub recipient_name: String,
    /// The viewer is the recipient.
    pub is_received: bool,
    /// Received and not yet opened.
    pub unread: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Shorten `content` to `max_chars` characters, marking the cut with `...`.
pub fn preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let cut: String = content.chars().take(max_chars).collect();
    format!("{cut}...")
}

/// Name shown for one side of a conversation.
pub fn participant_name(
    participant_id: Uuid,
    viewer_id: Uuid,
    company_name: Option<&str>,
    first_name: Option<&str>,
) -> String {
    if participant_id == viewer_id {
        return "You".to_string();
    }
    company_name
        .filter(|c| !c.trim().is_empty())
        .or(first_name.filter(|f| !f.trim().is_empty()))
        .unwrap_or("Unknown")
        .to_string()
}

/// Turn joined message rows into inbox rows for `viewer_id`.
pub fn build_inbox(
    rows: Vec<MessageDetail>,
    viewer_id: Uuid,
    preview_length: usize,
) -> Vec<InboxMessage> {
    rows.into_iter()
        .map(|row| {
            let m = row.message;
            let is_received = m.recipient_id == viewer_id;
            InboxMessage {
                sender_name: participant_name(
                    m.sender_id,
                    viewer_id,
                    row.sender_company_name.as_deref(),
                    row.sender_first_name.as_deref(),
                ),
                recipient_name: participant_name(
                    m.recipient_id,
                    viewer_id,
                    row.recipient_company_name.as_deref(),
                    row.recipient_first_name.as_deref(),
                ),
                listing_title: row
                    .listing_title
                    .unwrap_or_else(|| "Unknown Listing".to_string()),
                preview: preview(&m.content, preview_length),
                unread: is_received && m.read_at.is_none(),
                is_received,
                id: m.id,
                listing_id: m.listing_id,
                subject: m.subject,
                content: m.content,
                sender_id: m.sender_id,
                recipient_id: m.recipient_id,
                read_at: m.read_at,
                created_at: m.created_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_entity::message::Message;

    fn row(sender: Uuid, recipient: Uuid, content: &str, read: bool) -> MessageDetail {
        MessageDetail {
            message: Message {
                id: Uuid::new_v4(),
                sender_id: sender,
                recipient_id: recipient,
                listing_id: Uuid::new_v4(),
                subject: "Interest in: Forklift".to_string(),
                content: content.to_string(),
                read_at: read.then(Utc::now),
                created_at: Utc::now(),
            },
            listing_title: Some("Forklift".to_string()),
            sender_first_name: Some("Ana".to_string()),
            sender_company_name: Some("Ana Trading".to_string()),
            recipient_first_name: Some("Bo".to_string()),
            recipient_company_name: None,
        }
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "x".repeat(150);
        let p = preview(&long, 100);
        assert_eq!(p.chars().count(), 103);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short", 100), "short");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(preview(&text, 5), text);
        assert_eq!(preview(&text, 3), "ééé...");
    }

    #[test]
    fn test_participant_name_fallbacks() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert_eq!(participant_name(me, me, Some("Acme"), Some("Al")), "You");
        assert_eq!(participant_name(other, me, Some("Acme"), Some("Al")), "Acme");
        assert_eq!(participant_name(other, me, Some(" "), Some("Al")), "Al");
        assert_eq!(participant_name(other, me, None, None), "Unknown");
    }

    #[test]
    fn test_build_inbox_from_recipient_side() {
        let seller = Uuid::new_v4();
        let buyer = Uuid::new_v4();
        let inbox = build_inbox(vec![row(buyer, seller, "Is it still available?", false)], seller, 100);

        assert_eq!(inbox.len(), 1);
        let msg = &inbox[0];
        assert!(msg.is_received);
        assert!(msg.unread);
        assert_eq!(msg.sender_name, "Ana Trading");
        assert_eq!(msg.recipient_name, "You");
        assert_eq!(msg.listing_title, "Forklift");
    }

    #[test]
    fn test_sent_messages_are_never_unread() {
        let seller = Uuid::new_v4();
        let buyer = Uuid::new_v4();
        let inbox = build_inbox(vec![row(buyer, seller, "Hello", false)], buyer, 100);

        assert!(!inbox[0].is_received);
        assert!(!inbox[0].unread);
        assert_eq!(inbox[0].sender_name, "You");
        assert_eq!(inbox[0].recipient_name, "Bo");
    }

    #[test]
    fn test_missing_listing_title() {
        let mut detail = row(Uuid::new_v4(), Uuid::new_v4(), "Hi", true);
        detail.listing_title = None;
        let inbox = build_inbox(vec![detail], Uuid::new_v4(), 100);
        assert_eq!(inbox[0].listing_title, "Unknown Listing");
    }
}
