//! Signing and verification of access tokens.
//!
//! Tokens are issued elsewhere in production; the server only verifies them.
//! Issuing lives here for tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::Claims;
use crate::config::JwtSettings;
use crate::types::{ImporterId, UserId};

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies HS256 access tokens carrying the acting user.
#[derive(Clone)]
pub struct JwtService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl", &self.ttl)
            .field("keys", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Creates a service signing with `secret`; issued tokens live for `ttl`.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            ttl,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Creates a service from the `jwt` configuration section.
    #[must_use]
    pub fn from_settings(settings: &JwtSettings) -> Self {
        let secs = i64::try_from(settings.access_token_expiry_secs).unwrap_or(i64::MAX);
        let ttl = Duration::try_seconds(secs).unwrap_or(Duration::MAX);
        Self::new(&settings.secret, ttl)
    }

    /// Issues a token for `user` acting in `role`.
    ///
    /// Importer users must pass the importer they act for.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if signing fails.
    pub fn issue(
        &self,
        user: UserId,
        role: &str,
        importer: Option<ImporterId>,
    ) -> Result<String, JwtError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| JwtError::EncodingError("token lifetime out of range".to_string()))?;
        let claims = Claims::new(user, role, importer, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// - `JwtError::Expired` once `exp` has passed
    /// - `JwtError::DecodingError` for malformed or forged tokens
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}
