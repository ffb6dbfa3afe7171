//! Read model returned for a single listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_entity::listing::{Listing, ListingDetail, ListingStatus};

use crate::context::RequestContext;

/// Seller shown on a listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SellerSummary {
    pub user_id: Uuid,
    /// Company name, else first name, else `"Unknown Seller"`.
    pub name: String,
    pub verified: bool,
}

/// A listing as shown on its detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub images: Vec<String>,
    pub status: ListingStatus,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub condition_id: Option<Uuid>,
    pub condition_name: Option<String>,
    pub view_count: i64,
    pub disabled_by_admin: bool,
    pub disabled_reason: Option<String>,
    pub deleted_by_user: bool,
    pub seller: SellerSummary,
    /// The caller owns the listing.
    pub is_owner: bool,
    /// The caller may change the listing status.
    pub can_change_status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether `ctx` may see `listing`.
pub fn can_view(listing: &Listing, ctx: &RequestContext) -> bool {
    listing.is_publicly_visible() || listing.is_owned_by(ctx.user_id) || ctx.can_manage_listings()
}

/// Seller display name on the detail page.
pub fn seller_name(company_name: Option<&str>, first_name: Option<&str>) -> String {
    company_name
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or_else(|| first_name.map(str::trim).filter(|f| !f.is_empty()))
        .unwrap_or("Unknown Seller")
        .to_string()
}

impl ListingView {
    /// Shape a joined row for `ctx`.
    pub fn from_detail(detail: ListingDetail, ctx: &RequestContext) -> Self {
        let ListingDetail {
            listing,
            category_name,
            condition_name,
            seller_first_name,
            seller_company_name,
            seller_verified,
        } = detail;
        let is_owner = listing.is_owned_by(ctx.user_id);

        Self {
            seller: SellerSummary {
                user_id: listing.user_id,
                name: seller_name(seller_company_name.as_deref(), seller_first_name.as_deref()),
                verified: seller_verified.unwrap_or(false),
            },
            is_owner,
            can_change_status: is_owner || ctx.can_manage_listings(),
            id: listing.id,
            title: listing.title,
            description: listing.description,
            price: listing.price,
            location: listing.location,
            images: listing.images,
            status: listing.status,
            category_id: listing.category_id,
            category_name,
            condition_id: listing.condition_id,
            condition_name,
            view_count: listing.view_count,
            disabled_by_admin: listing.disabled_by_admin,
            disabled_reason: listing.disabled_reason,
            deleted_by_user: listing.deleted_by_user,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use tradepost_entity::user::{RoleSet, UserRole};

    use super::*;

    fn listing(owner: Uuid, status: ListingStatus) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            user_id: owner,
            title: "Pallet racking".to_string(),
            description: "40 bays".to_string(),
            price: 900.0,
            category_id: None,
            condition_id: None,
            location: "Antwerp".to_string(),
            images: Vec::new(),
            status,
            deleted_by_user: false,
            deleted_at: None,
            deletion_reason: None,
            disabled_by_admin: false,
            disabled_reason: None,
            view_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ctx(roles: &[UserRole]) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), "u@example.com".into(), roles.iter().copied().collect::<RoleSet>())
    }

    #[test]
    fn test_seller_name_fallbacks() {
        assert_eq!(seller_name(Some("Acme"), Some("Jo")), "Acme");
        assert_eq!(seller_name(Some(""), Some("Jo")), "Jo");
        assert_eq!(seller_name(None, None), "Unknown Seller");
    }

    #[test]
    fn test_visibility() {
        let viewer = ctx(&[UserRole::Client]);
        let published = listing(Uuid::new_v4(), ListingStatus::Published);
        assert!(can_view(&published, &viewer));

        let draft = listing(Uuid::new_v4(), ListingStatus::Draft);
        assert!(!can_view(&draft, &viewer));
        assert!(can_view(&draft, &ctx(&[UserRole::Backoffice])));

        let own_draft = listing(viewer.user_id, ListingStatus::Draft);
        assert!(can_view(&own_draft, &viewer));

        let mut disabled = listing(Uuid::new_v4(), ListingStatus::Published);
        disabled.disabled_by_admin = true;
        assert!(!can_view(&disabled, &viewer));
    }
}
