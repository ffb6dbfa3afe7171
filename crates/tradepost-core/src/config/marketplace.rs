//! Marketplace rules: search paging, listing wizard limits, messaging.

use serde::{Deserialize, Serialize};

/// Business-rule configuration for listings, search and messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// Number of search results per page.
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u64,
    /// Upper bound of the price filter when the caller does not give one.
    #[serde(default = "default_max_price")]
    pub default_max_price: f64,
    /// Maximum number of photos attached to a listing.
    #[serde(default = "default_max_photos")]
    pub max_photos: usize,
    /// Maximum listing title length in characters.
    #[serde(default = "default_title_max")]
    pub title_max_length: usize,
    /// Maximum listing description length in characters.
    #[serde(default = "default_description_max")]
    pub description_max_length: usize,
    /// Number of characters of a message shown in inbox previews.
    #[serde(default = "default_preview_length")]
    pub message_preview_length: usize,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            search_page_size: default_search_page_size(),
            default_max_price: default_max_price(),
            max_photos: default_max_photos(),
            title_max_length: default_title_max(),
            description_max_length: default_description_max(),
            message_preview_length: default_preview_length(),
        }
    }
}

fn default_search_page_size() -> u64 {
    6
}

fn default_max_price() -> f64 {
    100_000.0
}

fn default_max_photos() -> usize {
    8
}

fn default_title_max() -> usize {
    100
}

fn default_description_max() -> usize {
    2000
}

fn default_preview_length() -> usize {
    100
}
