//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use tradepost_core::error::AppError;
use tradepost_core::types::ListingSort;
use tradepost_entity::listing::ListingStatus;
use tradepost_service::auth::Registration;
use tradepost_service::listing::{ListingDraft, SearchCriteria};
use tradepost_service::user::ProfileUpdate;

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 200, message = "Company name is required"))]
    pub company_name: String,
    #[validate(length(max = 50))]
    pub affiliate_code: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
            first_name: req.first_name,
            last_name: req.last_name,
            company_name: req.company_name,
            affiliate_code: req.affiliate_code,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Profile update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
    #[validate(length(max = 50))]
    pub affiliate_code: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            company_name: req.company_name,
            affiliate_code: req.affiliate_code,
        }
    }
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Search query string. List parameters are comma separated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub categories: Option<String>,
    pub conditions: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub page: Option<u64>,
}

impl SearchParams {
    /// Build search criteria, defaulting the price ceiling to `default_max_price`.
    pub fn into_criteria(self, default_max_price: f64) -> Result<SearchCriteria, AppError> {
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => ListingSort::default(),
            Some(s) => s.parse()?,
        };

        let min_price = self.min_price.unwrap_or(0.0);
        let max_price = self.max_price.unwrap_or(default_max_price);
        if min_price > max_price {
            return Err(AppError::validation(
                "Minimum price cannot exceed maximum price",
            ));
        }

        Ok(SearchCriteria {
            query: self.q.unwrap_or_default(),
            categories: split_list(self.categories.as_deref()),
            conditions: split_list(self.conditions.as_deref()),
            location: self.location,
            min_price,
            max_price,
            sort,
            page: self.page.unwrap_or(1),
        })
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Wizard step evaluation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardValidateRequest {
    /// 1-based step number.
    pub step: u8,
    #[serde(default)]
    pub draft: ListingDraft,
}

/// Listing status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: ListingStatus,
}

/// Listing deletion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteListingRequest {
    #[validate(length(max = 500))]
    pub reason: String,
}

/// New message about a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub listing_id: Uuid,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(max = 5000))]
    pub content: String,
}

/// Verification flag update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub verified: bool,
}

/// Moderation flag update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DisableListingRequest {
    pub disabled: bool,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// New category or condition.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CatalogEntryRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "correct horse battery staple".to_string(),
            confirm_password: "correct horse battery staple".to_string(),
            first_name: "Rui".to_string(),
            last_name: "Costa".to_string(),
            company_name: "Costa Lda".to_string(),
            affiliate_code: None,
        }
    }

    #[test]
    fn test_register_request_checks_email_syntax() {
        assert!(registration("buyer@example.com").validate().is_ok());
        for email in ["", "buyer", "buyer@example..com", "buyer@exa,mple.com"] {
            assert!(registration(email).validate().is_err(), "{email:?} accepted");
        }
    }

    #[test]
    fn test_search_params_defaults() {
        let criteria = SearchParams::default().into_criteria(100_000.0).unwrap();
        assert_eq!(criteria.min_price, 0.0);
        assert_eq!(criteria.max_price, 100_000.0);
        assert_eq!(criteria.sort, ListingSort::Relevance);
        assert_eq!(criteria.page, 1);
        assert!(criteria.categories.is_empty());
    }

    #[test]
    fn test_search_params_split_lists() {
        let params = SearchParams {
            categories: Some("Office Equipment, Industrial Equipment,".to_string()),
            sort: Some("price-desc".to_string()),
            ..Default::default()
        };
        let criteria = params.into_criteria(100_000.0).unwrap();
        assert_eq!(
            criteria.categories,
            vec!["Office Equipment".to_string(), "Industrial Equipment".to_string()]
        );
        assert_eq!(criteria.sort, ListingSort::PriceDesc);
    }

    #[test]
    fn test_search_params_reject_unknown_sort() {
        let params = SearchParams {
            sort: Some("cheapest".to_string()),
            ..Default::default()
        };
        assert!(params.into_criteria(100_000.0).is_err());
    }

    #[test]
    fn test_search_params_reject_inverted_range() {
        let params = SearchParams {
            min_price: Some(500.0),
            max_price: Some(100.0),
            ..Default::default()
        };
        assert!(params.into_criteria(100_000.0).is_err());
    }
}
