//! Account authentication service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use tradepost_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use tradepost_auth::password::{PasswordHasher, PasswordValidator};
use tradepost_core::error::AppError;
use tradepost_core::result::AppResult;
use tradepost_database::repositories::{ProfileRepository, RoleRepository, UserRepository};
use tradepost_entity::user::{CreateProfile, CreateUser, Profile, RoleSet, UserAccount, UserRole};

use crate::context::RequestContext;

/// Sign-up form.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub affiliate_code: Option<String>,
}

/// Account, profile and roles of one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub affiliate_code: Option<String>,
    pub is_verified: bool,
    pub roles: RoleSet,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl UserSummary {
    fn build(account: &UserAccount, profile: Option<Profile>, roles: RoleSet) -> Self {
        let (first_name, last_name, company_name, affiliate_code, is_verified) = match profile {
            Some(p) => (
                Some(p.first_name),
                Some(p.last_name),
                p.company_name,
                p.affiliate_code,
                p.is_verified,
            ),
            None => (None, None, None, None, false),
        };
        Self {
            id: account.id,
            email: account.email.clone(),
            first_name,
            last_name,
            company_name,
            affiliate_code,
            is_verified,
            roles,
            created_at: account.created_at,
            last_login_at: account.last_login_at,
        }
    }
}

/// Tokens plus the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: UserSummary,
}

/// Handles sign-up, sign-in and token refresh.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    profile_repo: Arc<ProfileRepository>,
    role_repo: Arc<RoleRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    default_role: UserRole,
}

impl AuthService {
    /// Creates a new auth service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<UserRepository>,
        profile_repo: Arc<ProfileRepository>,
        role_repo: Arc<RoleRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        default_role: UserRole,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            role_repo,
            hasher,
            validator,
            encoder,
            decoder,
            default_role,
        }
    }

    /// Create an account with the default role and sign it in.
    pub async fn register(&self, form: Registration) -> AppResult<AuthSession> {
        self.validator
            .validate_confirmation(&form.password, &form.confirm_password)?;

        let email = normalize_email(&form.email)?;
        let first_name = required(&form.first_name, "First name")?;
        let last_name = required(&form.last_name, "Last name")?;
        let company_name = required(&form.company_name, "Company name")?;

        self.validator.validate(
            &form.password,
            &[email.as_str(), first_name.as_str(), last_name.as_str(), company_name.as_str()],
        )?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("An account with this email already exists"));
        }

        let password_hash = self.hasher.hash_password(&form.password)?;
        let account = self
            .user_repo
            .register(
                &CreateUser {
                    email: email.clone(),
                    password_hash,
                },
                &CreateProfile {
                    user_id: Uuid::nil(),
                    first_name,
                    last_name,
                    company_name: Some(company_name),
                    affiliate_code: optional(form.affiliate_code.as_deref()),
                },
                self.default_role,
            )
            .await?;

        info!(user_id = %account.id, role = %self.default_role, "Account registered");
        self.issue(&account).await
    }

    /// Verify credentials and issue a token pair.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let invalid = || AppError::unauthorized("Invalid email or password");

        let Some(account) = self.user_repo.find_by_email(email.trim()).await? else {
            warn!("Login attempt for unknown email");
            return Err(invalid());
        };

        if !self.hasher.verify_password(password, &account.password_hash)? {
            warn!(user_id = %account.id, "Login failed: wrong password");
            return Err(invalid());
        }

        self.user_repo.touch_last_login(account.id).await?;
        info!(user_id = %account.id, "Login successful");
        self.issue(&account).await
    }

    /// Exchange a refresh token for a new pair carrying the current roles.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthSession> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let account = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;
        self.issue(&account).await
    }

    /// The signed-in user's account, profile and roles.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<UserSummary> {
        let account = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let profile = self.profile_repo.find_by_user(account.id).await?;
        let roles = self.role_repo.roles_for(account.id).await?;
        Ok(UserSummary::build(&account, profile, roles))
    }

    async fn issue(&self, account: &UserAccount) -> AppResult<AuthSession> {
        let roles = self.role_repo.roles_for(account.id).await?;
        let profile = self.profile_repo.find_by_user(account.id).await?;
        let tokens = self
            .encoder
            .generate_token_pair(account.id, &account.email, &roles)?;
        Ok(AuthSession {
            tokens,
            user: UserSummary::build(account, profile, roles),
        })
    }
}

/// Trim and lowercase an email address, then check its syntax.
pub fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if !email.validate_email() {
        return Err(AppError::validation("Please enter a valid email address"));
    }
    Ok(email)
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_core::error::ErrorKind;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Admin@Test.com ").unwrap(), "admin@test.com");
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("a b@c.de").is_err());
        assert!(normalize_email("@c.de").is_err());
    }

    #[test]
    fn test_normalize_email_rejects_malformed_domains() {
        for raw in ["a@b..c", "a@b,c.d", "a@[b.c", "a@b.c\0", "a@.b.c", "a@b.c."] {
            let err = normalize_email(raw).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(Some(" REF42 ")), Some("REF42".to_string()));
    }
}
