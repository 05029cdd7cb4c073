//! JWT service for token generation and validation
//!
//! Access and refresh tokens are signed with HS256 using a shared secret.
//! Every token carries a unique `jti` identifier so it can be revoked
//! individually via the token blacklist.

use anyhow::Result;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::error;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, AuthCause};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Access token expiration time in seconds (default: 1 hour)
    pub access_token_expiry: u64,
    /// Refresh token expiration time in seconds (default: 7 days)
    pub refresh_token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET_KEY`: Signing secret (required)
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Access token expiry in seconds (default: 3600)
    /// - `JWT_REFRESH_TOKEN_EXPIRY`: Refresh token expiry in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET_KEY environment variable not set"))?;

        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);

        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);

        Ok(JwtConfig {
            secret,
            access_token_expiry,
            refresh_token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued to
    pub sub: i32,
    /// Unique token identifier, recorded on revocation
    pub jti: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Token type (access or refresh)
    pub token_type: TokenType,
}

/// Token type enum
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum TokenType {
    /// Access token
    Access,
    /// Refresh token
    Refresh,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user_id: i32) -> ApiResult<String> {
        self.issue(user_id, TokenType::Access, self.config.access_token_expiry)
    }

    /// Generate a refresh token for a user
    pub fn generate_refresh_token(&self, user_id: i32) -> ApiResult<String> {
        self.issue(user_id, TokenType::Refresh, self.config.refresh_token_expiry)
    }

    fn issue(&self, user_id: i32, token_type: TokenType, ttl: u64) -> ApiResult<String> {
        let now = unix_now()?;

        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + ttl,
            token_type,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            error!("Failed to encode token: {}", e);
            ApiError::Internal
        })
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> ApiResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        ApiError::Auth(AuthCause::ExpiredToken)
                    }
                    _ => ApiError::Auth(AuthCause::InvalidToken),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Get the access token expiry time
    pub fn access_token_expiry(&self) -> u64 {
        self.config.access_token_expiry
    }

    /// Get the refresh token expiry time
    pub fn refresh_token_expiry(&self) -> u64 {
        self.config.refresh_token_expiry
    }
}

fn unix_now() -> ApiResult<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| {
            error!("Failed to get current time: {}", e);
            ApiError::Internal
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        })
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = test_service();
        let token = service.generate_access_token(7).unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_refresh_token_is_typed() {
        let service = test_service();
        let token = service.generate_refresh_token(3).unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, 3);
        assert_eq!(claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_each_token_gets_a_fresh_jti() {
        let service = test_service();
        let first = service.generate_access_token(1).unwrap();
        let second = service.generate_access_token(1).unwrap();

        let first = service.validate_token(&first).unwrap();
        let second = service.validate_token(&second).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let service = test_service();
        let other = JwtService::new(JwtConfig {
            secret: "a-different-secret".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        });

        let token = other.generate_access_token(1).unwrap();
        match service.validate_token(&token) {
            Err(ApiError::Auth(AuthCause::InvalidToken)) => {}
            other => panic!("expected invalid token, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_service();
        let now = unix_now().unwrap();

        // Expired well past jsonwebtoken's default leeway.
        let claims = Claims {
            sub: 1,
            jti: Uuid::new_v4().to_string(),
            iat: now - 7200,
            exp: now - 3600,
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("unit-test-secret".as_bytes()),
        )
        .unwrap();

        match service.validate_token(&token) {
            Err(ApiError::Auth(AuthCause::ExpiredToken)) => {}
            other => panic!("expected expired token, got {:?}", other.map(|c| c.sub)),
        }
    }
}
