//! Marketplace search: filter, sort and paginate published listings.
//!
//! The repository returns every searchable listing; filtering, ordering and
//! paging happen here so the rules stay in one testable place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use tradepost_core::result::AppResult;
use tradepost_core::types::{ListingSort, PageRequest, PageResponse};
use tradepost_database::repositories::{CatalogRepository, ListingRepository};
use tradepost_entity::listing::{Category, Condition, ListingDetail};

use crate::context::RequestContext;

/// Location value that disables the location filter.
pub const ALL_COUNTRIES: &str = "All Countries";

/// Fallback for missing condition and seller names in search results.
const UNKNOWN: &str = "Unknown";

/// Filter, sort and page selection for one search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free text matched against title and description.
    #[serde(default)]
    pub query: String,
    /// Category names; empty matches all.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Condition names; empty matches all.
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Location substring; `None` or [`ALL_COUNTRIES`] matches all.
    pub location: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    #[serde(default)]
    pub sort: ListingSort,
    #[serde(default = "first_page")]
    pub page: u64,
}

fn first_page() -> u64 {
    1
}

impl SearchCriteria {
    /// Match-everything criteria with the given price ceiling.
    pub fn unfiltered(max_price: f64) -> Self {
        Self {
            query: String::new(),
            categories: Vec::new(),
            conditions: Vec::new(),
            location: None,
            min_price: 0.0,
            max_price,
            sort: ListingSort::Relevance,
            page: 1,
        }
    }

    /// Whether `card` satisfies every criterion.
    pub fn matches(&self, card: &ListingCard) -> bool {
        let query = self.query.trim().to_lowercase();
        let query_ok = query.is_empty()
            || card.title.to_lowercase().contains(&query)
            || card.description.to_lowercase().contains(&query);

        let category_ok = self.categories.is_empty()
            || card
                .category_name
                .as_ref()
                .is_some_and(|name| self.categories.contains(name));

        let condition_ok =
            self.conditions.is_empty() || self.conditions.contains(&card.condition_name);

        let location_ok = match self.location.as_deref().map(str::trim) {
            None | Some("") | Some(ALL_COUNTRIES) => true,
            Some(wanted) => card
                .location
                .to_lowercase()
                .contains(&wanted.to_lowercase()),
        };

        let price_ok = card.price >= self.min_price && card.price <= self.max_price;

        query_ok && category_ok && condition_ok && location_ok && price_ok
    }
}

/// A search result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCard {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub images: Vec<String>,
    pub category_name: Option<String>,
    /// `"Unknown"` when the listing has no condition.
    pub condition_name: String,
    pub seller_id: Uuid,
    /// Company name, else `"Unknown"`.
    pub seller_name: String,
    pub seller_verified: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ListingDetail> for ListingCard {
    fn from(detail: ListingDetail) -> Self {
        let listing = detail.listing;
        Self {
            id: listing.id,
            title: listing.title,
            description: listing.description,
            price: listing.price,
            location: listing.location,
            images: listing.images,
            category_name: detail.category_name,
            condition_name: detail.condition_name.unwrap_or_else(|| UNKNOWN.to_string()),
            seller_id: listing.user_id,
            seller_name: detail
                .seller_company_name
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            seller_verified: detail.seller_verified.unwrap_or(false),
            view_count: listing.view_count,
            created_at: listing.created_at,
        }
    }
}

/// Facet lists offered next to the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFacets {
    pub categories: Vec<Category>,
    pub conditions: Vec<Condition>,
}

/// Response of a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(flatten)]
    pub page: PageResponse<ListingCard>,
    pub sort: ListingSort,
    pub facets: SearchFacets,
}

/// Order `cards` in place. Relevance keeps the input order.
pub fn sort_cards(cards: &mut [ListingCard], sort: ListingSort) {
    match sort {
        ListingSort::Relevance => {}
        ListingSort::PriceAsc => cards.sort_by(|a, b| a.price.total_cmp(&b.price)),
        ListingSort::PriceDesc => cards.sort_by(|a, b| b.price.total_cmp(&a.price)),
        ListingSort::Newest => cards.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Filter, sort and paginate `cards`.
pub fn run_search(
    cards: Vec<ListingCard>,
    criteria: &SearchCriteria,
    page_size: u64,
) -> PageResponse<ListingCard> {
    let mut matching: Vec<ListingCard> = cards.into_iter().filter(|c| criteria.matches(c)).collect();
    sort_cards(&mut matching, criteria.sort);
    PageResponse::paginate(matching, PageRequest::new(criteria.page, page_size))
}

/// Search over the published catalog.
#[derive(Debug, Clone)]
pub struct SearchService {
    listing_repo: Arc<ListingRepository>,
    catalog_repo: Arc<CatalogRepository>,
    page_size: u64,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(
        listing_repo: Arc<ListingRepository>,
        catalog_repo: Arc<CatalogRepository>,
        page_size: u64,
    ) -> Self {
        Self {
            listing_repo,
            catalog_repo,
            page_size,
        }
    }

    /// Run a search and attach the facet lists.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        criteria: &SearchCriteria,
    ) -> AppResult<SearchResults> {
        let cards: Vec<ListingCard> = self
            .listing_repo
            .find_searchable()
            .await?
            .into_iter()
            .map(ListingCard::from)
            .collect();
        let candidates = cards.len();

        let page = run_search(cards, criteria, self.page_size);
        debug!(
            user_id = %ctx.user_id,
            candidates,
            matched = page.total_items,
            page = page.page,
            sort = %criteria.sort,
            "Listing search"
        );

        let facets = SearchFacets {
            categories: self.catalog_repo.list_categories().await?,
            conditions: self.catalog_repo.list_conditions().await?,
        };

        Ok(SearchResults {
            page,
            sort: criteria.sort,
            facets,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn card(title: &str, category: &str, condition: &str, price: f64, age_days: i64) -> ListingCard {
        ListingCard {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{title} in good order"),
            price,
            location: "Rotterdam, Netherlands".to_string(),
            images: Vec::new(),
            category_name: Some(category.to_string()),
            condition_name: condition.to_string(),
            seller_id: Uuid::new_v4(),
            seller_name: "Acme".to_string(),
            seller_verified: false,
            view_count: 0,
            created_at: Utc::now() - Duration::days(age_days),
        }
    }

    fn fixture() -> Vec<ListingCard> {
        vec![
            card("Excavator", "Construction Machinery", "Used", 45_000.0, 3),
            card("Desk set", "Office Equipment", "Like New", 350.0, 1),
            card("Mini loader", "Construction Machinery", "New", 18_000.0, 7),
            card("Crane", "Construction Machinery", "For Parts", 95_000.0, 2),
            card("Printer", "Office Equipment", "Used", 120.0, 5),
        ]
    }

    #[test]
    fn test_category_and_price_filter_returns_exact_subset() {
        let mut criteria = SearchCriteria::unfiltered(100_000.0);
        criteria.categories = vec!["Construction Machinery".to_string()];
        criteria.min_price = 10_000.0;
        criteria.max_price = 50_000.0;

        let page = run_search(fixture(), &criteria, 6);
        let titles: Vec<&str> = page.items.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Excavator", "Mini loader"]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let mut criteria = SearchCriteria::unfiltered(350.0);
        criteria.min_price = 120.0;
        let page = run_search(fixture(), &criteria, 6);
        assert_eq!(page.total_items, 2);
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let mut criteria = SearchCriteria::unfiltered(100_000.0);
        criteria.query = "  LOADER ".to_string();
        let page = run_search(fixture(), &criteria, 6);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Mini loader");

        criteria.query = "good order".to_string();
        assert_eq!(run_search(fixture(), &criteria, 6).total_items, 5);
    }

    #[test]
    fn test_condition_filter() {
        let mut criteria = SearchCriteria::unfiltered(100_000.0);
        criteria.conditions = vec!["Used".to_string(), "New".to_string()];
        assert_eq!(run_search(fixture(), &criteria, 6).total_items, 3);
    }

    #[test]
    fn test_location_filter() {
        let mut criteria = SearchCriteria::unfiltered(100_000.0);
        criteria.location = Some(ALL_COUNTRIES.to_string());
        assert_eq!(run_search(fixture(), &criteria, 6).total_items, 5);

        criteria.location = Some("netherlands".to_string());
        assert_eq!(run_search(fixture(), &criteria, 6).total_items, 5);

        criteria.location = Some("Germany".to_string());
        assert_eq!(run_search(fixture(), &criteria, 6).total_items, 0);
    }

    #[test]
    fn test_sort_orders() {
        let mut criteria = SearchCriteria::unfiltered(100_000.0);

        criteria.sort = ListingSort::PriceAsc;
        let asc = run_search(fixture(), &criteria, 6);
        assert_eq!(asc.items.first().map(|c| c.price), Some(120.0));
        assert_eq!(asc.items.last().map(|c| c.price), Some(95_000.0));

        criteria.sort = ListingSort::PriceDesc;
        let desc = run_search(fixture(), &criteria, 6);
        assert_eq!(desc.items[0].title, "Crane");

        criteria.sort = ListingSort::Newest;
        let newest = run_search(fixture(), &criteria, 6);
        assert_eq!(newest.items[0].title, "Desk set");

        criteria.sort = ListingSort::Relevance;
        let relevance = run_search(fixture(), &criteria, 6);
        assert_eq!(relevance.items[0].title, "Excavator");
    }

    #[test]
    fn test_thirteen_results_paginate_six_six_one() {
        let cards: Vec<ListingCard> = (0..13)
            .map(|i| card(&format!("Item {i}"), "Office Equipment", "Used", 10.0, i))
            .collect();
        let mut criteria = SearchCriteria::unfiltered(100_000.0);

        let sizes: Vec<usize> = (1..=3)
            .map(|p| {
                criteria.page = p;
                run_search(cards.clone(), &criteria, 6).items.len()
            })
            .collect();
        assert_eq!(sizes, vec![6, 6, 1]);

        criteria.page = 1;
        let first = run_search(cards, &criteria, 6);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.page_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_card_fallbacks() {
        let detail_card = ListingCard::from(ListingDetail {
            listing: tradepost_entity::listing::Listing {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                title: "Van".into(),
                description: "Diesel".into(),
                price: 1.0,
                category_id: None,
                condition_id: None,
                location: "Porto".into(),
                images: vec![],
                status: tradepost_entity::listing::ListingStatus::Published,
                deleted_by_user: false,
                deleted_at: None,
                deletion_reason: None,
                disabled_by_admin: false,
                disabled_reason: None,
                view_count: 3,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            category_name: None,
            condition_name: None,
            seller_first_name: Some("Ana".into()),
            seller_company_name: None,
            seller_verified: None,
        });
        assert_eq!(detail_card.condition_name, "Unknown");
        assert_eq!(detail_card.seller_name, "Unknown");
        assert!(!detail_card.seller_verified);
    }
}
