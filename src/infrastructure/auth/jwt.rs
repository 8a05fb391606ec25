//! JWT token issuance and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

use crate::domain::{DomainError, UserId};

/// Issuer claim stamped into every token
pub const TOKEN_ISSUER: &str = "account-api";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: i64,
    /// Username
    pub username: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl JwtClaims {
    /// Create new claims for a user identity
    pub fn new(user_id: UserId, username: impl Into<String>, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user_id.as_i64(),
            username: username.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get the user ID from claims
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// Configuration for the JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

/// Trait for JWT operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Issue a signed token bound to a user identity
    fn issue(&self, user_id: UserId, username: &str) -> Result<String, DomainError>;

    /// Validate a token and return the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Get the token expiration time in hours
    fn expiration_hours(&self) -> u64;
}

/// JWT service implementation using a symmetric HS256 secret
#[derive(Clone)]
pub struct JwtService {
    expiration_hours: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.expiration_hours)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    ///
    /// Fails when the secret is empty: a missing signing secret must stop
    /// the process at startup rather than degrade into a known default.
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::configuration(
                "JWT signing secret must not be empty",
            ));
        }

        // Pin the algorithm: tokens presenting any other signing method
        // (including "none") are rejected before their claims are read.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);

        Ok(Self {
            expiration_hours: config.expiration_hours,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }
}

impl JwtGenerator for JwtService {
    fn issue(&self, user_id: UserId, username: &str) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user_id, username, self.expiration_hours);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                // The distinction (expired vs forged vs malformed) stays in
                // the logs; callers see a single opaque category.
                debug!(kind = ?e.kind(), "Token validation failed");
                DomainError::unauthorized("Invalid or expired token")
            })?;

        Ok(token_data.claims)
    }

    fn expiration_hours(&self) -> u64 {
        self.expiration_hours
    }
}
