//! Listing entity model and joined read models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ListingStatus;

/// An item offered for sale.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    /// Unique listing identifier.
    pub id: Uuid,
    /// Seller account.
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    /// Asking price in euros.
    pub price: f64,
    pub category_id: Option<Uuid>,
    pub condition_id: Option<Uuid>,
    pub location: String,
    /// Public URLs of the listing photos, in upload order.
    pub images: Vec<String>,
    pub status: ListingStatus,
    /// Soft-deleted by the seller.
    pub deleted_by_user: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deletion_reason: Option<String>,
    /// Hidden by a moderator.
    pub disabled_by_admin: bool,
    pub disabled_reason: Option<String>,
    /// Number of detail views by users other than the seller.
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Whether the listing is visible to every signed-in user.
    pub fn is_publicly_visible(&self) -> bool {
        self.status == ListingStatus::Published && !self.disabled_by_admin && !self.deleted_by_user
    }

    /// Whether `user_id` owns the listing.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Data required to insert a listing. New listings start as drafts.
///
/// The id is chosen by the caller so photos can be stored before the row exists.
#[derive(Debug, Clone)]
pub struct CreateListing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub condition_id: Uuid,
    pub location: String,
    /// Public URLs of the already stored photos.
    pub images: Vec<String>,
}

/// Editable listing fields.
#[derive(Debug, Clone)]
pub struct UpdateListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub condition_id: Uuid,
    pub location: String,
}

/// A listing joined with its catalog names and seller profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListingDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: Listing,
    pub category_name: Option<String>,
    pub condition_name: Option<String>,
    pub seller_first_name: Option<String>,
    pub seller_company_name: Option<String>,
    pub seller_verified: Option<bool>,
}

/// A seller's own listing as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnedListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: Listing,
    pub category_name: Option<String>,
}

/// A listing as shown in the moderation console.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: Listing,
    pub owner_company_name: Option<String>,
    pub owner_first_name: Option<String>,
}
