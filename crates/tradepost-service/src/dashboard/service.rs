//! Dashboard assembly.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_core::result::AppResult;
use tradepost_database::repositories::{ListingRepository, MessageRepository};
use tradepost_entity::listing::{DisplayStatus, ListingStatus, OwnedListing};

use crate::context::RequestContext;

/// Headline numbers for a seller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Listings not deleted by the seller.
    pub total_listings: u64,
    /// Published and not deleted.
    pub active_listings: u64,
    /// Unread messages received.
    pub pending_messages: u64,
    /// Views across listings not deleted by the seller.
    pub total_views: u64,
}

/// One of the seller's listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardListing {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub category_name: String,
    pub status: ListingStatus,
    pub display_status: DisplayStatus,
    pub image: Option<String>,
    pub view_count: i64,
    pub deletion_reason: Option<String>,
    pub disabled_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OwnedListing> for DashboardListing {
    fn from(owned: OwnedListing) -> Self {
        let l = owned.listing;
        Self {
            display_status: DisplayStatus::resolve(l.status, l.deleted_by_user, l.disabled_by_admin),
            category_name: owned.category_name.unwrap_or_else(|| "Unknown".to_string()),
            image: l.images.into_iter().next(),
            id: l.id,
            title: l.title,
            price: l.price,
            status: l.status,
            view_count: l.view_count,
            deletion_reason: l.deletion_reason,
            disabled_reason: l.disabled_reason,
            created_at: l.created_at,
        }
    }
}

/// Stats plus listings, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub listings: Vec<DashboardListing>,
}

/// Compute dashboard numbers from a seller's listings.
pub fn compute_stats(listings: &[OwnedListing], unread_messages: i64) -> DashboardStats {
    let live = || listings.iter().map(|o| &o.listing).filter(|l| !l.deleted_by_user);
    DashboardStats {
        total_listings: live().count() as u64,
        active_listings: live()
            .filter(|l| l.status == ListingStatus::Published)
            .count() as u64,
        pending_messages: unread_messages.max(0) as u64,
        total_views: live().map(|l| l.view_count.max(0) as u64).sum(),
    }
}

/// Builds the seller dashboard.
#[derive(Debug, Clone)]
pub struct DashboardService {
    listing_repo: Arc<ListingRepository>,
    message_repo: Arc<MessageRepository>,
}

impl DashboardService {
    pub fn new(listing_repo: Arc<ListingRepository>, message_repo: Arc<MessageRepository>) -> Self {
        Self {
            listing_repo,
            message_repo,
        }
    }

    /// Load the caller's dashboard.
    pub async fn load(&self, ctx: &RequestContext) -> AppResult<Dashboard> {
        let owned = self.listing_repo.find_by_owner(ctx.user_id).await?;
        let unread = self.message_repo.count_unread_received(ctx.user_id).await?;
        let stats = compute_stats(&owned, unread);
        let listings = owned.into_iter().map(DashboardListing::from).collect();
        Ok(Dashboard { stats, listings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_entity::listing::Listing;

    fn owned(status: ListingStatus, deleted: bool, views: i64) -> OwnedListing {
        let now = Utc::now();
        OwnedListing {
            listing: Listing {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                title: "Pallet racking".to_string(),
                description: "Ten bays".to_string(),
                price: 1200.0,
                category_id: None,
                condition_id: None,
                location: "Portugal".to_string(),
                images: vec![],
                status,
                deleted_by_user: deleted,
                deleted_at: deleted.then_some(now),
                deletion_reason: deleted.then(|| "Sold elsewhere".to_string()),
                disabled_by_admin: false,
                disabled_reason: None,
                view_count: views,
                created_at: now,
                updated_at: now,
            },
            category_name: None,
        }
    }

    #[test]
    fn test_stats_ignore_deleted_listings() {
        let listings = vec![
            owned(ListingStatus::Published, false, 10),
            owned(ListingStatus::Draft, false, 3),
            owned(ListingStatus::Published, true, 50),
        ];
        let stats = compute_stats(&listings, 2);

        assert_eq!(stats.total_listings, 2);
        assert_eq!(stats.active_listings, 1);
        assert_eq!(stats.pending_messages, 2);
        assert_eq!(stats.total_views, 13);
    }

    #[test]
    fn test_empty_dashboard() {
        assert_eq!(compute_stats(&[], 0), DashboardStats::default());
    }

    #[test]
    fn test_dashboard_listing_labels() {
        let row = DashboardListing::from(owned(ListingStatus::Published, true, 1));
        assert_eq!(row.display_status, DisplayStatus::Deleted);
        assert_eq!(row.category_name, "Unknown");
        assert_eq!(row.deletion_reason.as_deref(), Some("Sold elsewhere"));
        assert!(row.image.is_none());
    }
}
