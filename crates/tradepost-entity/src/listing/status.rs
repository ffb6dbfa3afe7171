//! Listing lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication status stored on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Saved but not visible in search.
    Draft,
    /// Visible in search.
    Published,
    /// Withdrawn by the seller.
    Archived,
}

impl ListingStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = tradepost_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(tradepost_core::AppError::validation(format!(
                "Invalid listing status: '{s}'. Expected one of: draft, published, archived"
            ))),
        }
    }
}

/// Status label shown to a seller on their dashboard.
///
/// Deletion wins over moderation, which wins over the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayStatus {
    Deleted,
    Disabled,
    Published,
    Archived,
    Draft,
}

impl DisplayStatus {
    /// Derive the label from the listing flags.
    pub fn resolve(status: ListingStatus, deleted_by_user: bool, disabled_by_admin: bool) -> Self {
        if deleted_by_user {
            Self::Deleted
        } else if disabled_by_admin {
            Self::Disabled
        } else {
            match status {
                ListingStatus::Published => Self::Published,
                ListingStatus::Archived => Self::Archived,
                ListingStatus::Draft => Self::Draft,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_status_precedence() {
        assert_eq!(
            DisplayStatus::resolve(ListingStatus::Published, true, true),
            DisplayStatus::Deleted
        );
        assert_eq!(
            DisplayStatus::resolve(ListingStatus::Published, false, true),
            DisplayStatus::Disabled
        );
        assert_eq!(
            DisplayStatus::resolve(ListingStatus::Archived, false, false),
            DisplayStatus::Archived
        );
        assert_eq!(
            DisplayStatus::resolve(ListingStatus::Draft, false, false),
            DisplayStatus::Draft
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Published".parse::<ListingStatus>().unwrap(), ListingStatus::Published);
        assert!("sold".parse::<ListingStatus>().is_err());
    }
}
