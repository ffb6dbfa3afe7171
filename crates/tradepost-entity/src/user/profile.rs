//! Seller/buyer profile attached to every account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Public-facing profile of a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Owning account (also the primary key).
    pub user_id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Company the user trades for.
    pub company_name: Option<String>,
    /// Referral code supplied at sign-up.
    pub affiliate_code: Option<String>,
    /// Set by an administrator once the company has been checked.
    pub is_verified: bool,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Name shown next to listings: company, else first name.
    pub fn display_name(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| Some(self.first_name.as_str()).filter(|f| !f.trim().is_empty()))
    }

    /// Full personal name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Data required to create a profile.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    /// Owning account.
    pub user_id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Company name.
    pub company_name: Option<String>,
    /// Referral code.
    pub affiliate_code: Option<String>,
}

/// Profile fields a user may edit.
#[derive(Debug, Clone)]
pub struct UpdateProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Company name.
    pub company_name: Option<String>,
    /// Referral code.
    pub affiliate_code: Option<String>,
}

/// Profile joined with the account's email, as listed in the admin console.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserWithProfile {
    /// Profile columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub profile: Profile,
    /// Login email.
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(company: Option<&str>, first: &str) -> Profile {
        Profile {
            user_id: Uuid::nil(),
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            company_name: company.map(str::to_string),
            affiliate_code: None,
            is_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_company() {
        assert_eq!(profile(Some("Acme GmbH"), "Jane").display_name(), Some("Acme GmbH"));
        assert_eq!(profile(Some("  "), "Jane").display_name(), Some("Jane"));
        assert_eq!(profile(None, "").display_name(), None);
    }
}
