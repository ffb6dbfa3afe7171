//! Password policy enforcement for new passwords.

use tradepost_core::config::AuthConfig;
use tradepost_core::error::AppError;
use zxcvbn::Score;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    min_score: Score,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: score_floor(config.password_min_score),
        }
    }

    /// Validates a password against length and strength policies.
    ///
    /// `user_inputs` (email, names, company) are penalised by the strength
    /// estimator so passwords built from them score lower.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < self.min_score {
            let hint = estimate
                .feedback()
                .and_then(|f| f.warning())
                .map(|w| format!(" ({w})"))
                .unwrap_or_default();
            return Err(AppError::validation(format!(
                "Password is too weak{hint}. Please choose a stronger password."
            )));
        }

        Ok(())
    }

    /// Rejects a confirmation that does not match.
    pub fn validate_confirmation(&self, password: &str, confirmation: &str) -> Result<(), AppError> {
        if password != confirmation {
            return Err(AppError::validation("Passwords don't match"));
        }
        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

fn score_floor(configured: u8) -> Score {
    match configured {
        0 => Score::Zero,
        1 => Score::One,
        2 => Score::Two,
        3 => Score::Three,
        _ => Score::Four,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_short_password_rejected() {
        let err = validator().validate("abc", &[]).unwrap_err();
        assert!(err.message.contains("at least 8"));
    }

    #[test]
    fn test_common_password_rejected() {
        assert!(validator().validate("password", &[]).is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(validator()
            .validate("correct-horse-battery-staple-42", &["jane@example.com"])
            .is_ok());
    }

    #[test]
    fn test_confirmation_mismatch() {
        let err = validator()
            .validate_confirmation("Secret-Pass-1", "Secret-Pass-2")
            .unwrap_err();
        assert_eq!(err.message, "Passwords don't match");
    }
}
