//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tradepost_core::config::AuthConfig;
use tradepost_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates HS256 tokens issued by [`super::JwtEncoder`].
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_expecting(token, TokenType::Access)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_expecting(token, TokenType::Refresh)
    }

    fn decode_expecting(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            })?
            .claims;

        if claims.token_type != expected {
            return Err(AppError::unauthorized(match expected {
                TokenType::Access => "Invalid token type: expected access token",
                TokenType::Refresh => "Invalid token type: expected refresh token",
            }));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use tradepost_core::error::ErrorKind;
    use tradepost_entity::user::{RoleSet, UserRole};

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_round_trip_carries_roles() {
        let cfg = config("test-secret");
        let roles: RoleSet = [UserRole::Client, UserRole::Backoffice].into_iter().collect();
        let user_id = Uuid::new_v4();

        let pair = JwtEncoder::new(&cfg)
            .generate_token_pair(user_id, "seller@example.com", &roles)
            .unwrap();
        let claims = JwtDecoder::new(&cfg)
            .decode_access_token(&pair.access_token)
            .unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "seller@example.com");
        assert!(claims.roles.can_manage_listings());
        assert!(!claims.is_expired());
        assert_eq!(pair.token_type, "Bearer");
    }

    #[test]
    fn test_token_type_is_enforced() {
        let cfg = config("test-secret");
        let pair = JwtEncoder::new(&cfg)
            .generate_token_pair(Uuid::new_v4(), "a@b.co", &RoleSet::new())
            .unwrap();
        let decoder = JwtDecoder::new(&cfg);

        assert!(decoder.decode_refresh_token(&pair.refresh_token).is_ok());
        let err = decoder.decode_access_token(&pair.refresh_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(decoder.decode_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = JwtEncoder::new(&config("one"))
            .generate_token_pair(Uuid::new_v4(), "a@b.co", &RoleSet::new())
            .unwrap();
        let err = JwtDecoder::new(&config("two"))
            .decode_access_token(&pair.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("x"))
            .decode_access_token("not-a-jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
