//! Token codec: mints and verifies HS256-signed, typed tokens.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::{Role, TokenPayload, TokenType};

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid key size: must be at least {min} bytes, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("token subject must not be empty")]
    InvalidSubject,

    #[error("failed to sign token: {0}")]
    SigningFailure(String),

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,
}

/// Signs and verifies tokens with a single long-lived symmetric secret.
///
/// Holds only immutable key material, so one instance can be shared across
/// any number of concurrent requests.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let secret = secret.as_ref();
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::InvalidKeySize {
                min: MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }

        // Expiry is checked by `verify_at` with zero leeway, after the
        // signature, so the library's own time checks stay off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Mints a token valid for `duration` from now.
    ///
    /// A negative `duration` yields a token that is already expired.
    pub fn mint(
        &self,
        subject: &str,
        role: &Role,
        duration: Duration,
        token_type: TokenType,
    ) -> Result<String, TokenError> {
        self.mint_at(subject, role, duration, token_type, Utc::now())
    }

    pub fn mint_at(
        &self,
        subject: &str,
        role: &Role,
        duration: Duration,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if subject.trim().is_empty() {
            return Err(TokenError::InvalidSubject);
        }

        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(duration)
            .ok_or_else(|| TokenError::SigningFailure("expiry out of range".to_string()))?;

        let payload = TokenPayload {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            role: role.clone(),
            token_type,
            issued_at,
            expires_at,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailure(e.to_string()))
    }

    /// Verifies `token` and returns its payload if it is a valid, unexpired
    /// token of `expected` type.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<TokenPayload, TokenError> {
        self.verify_at(token, expected, Utc::now())
    }

    /// Checks, in order: structure and signature, expiry, issue time, type.
    pub fn verify_at(
        &self,
        token: &str,
        expected: TokenType,
        now: DateTime<Utc>,
    ) -> Result<TokenPayload, TokenError> {
        let payload = jsonwebtoken::decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected by decoder");
                TokenError::InvalidToken
            })?
            .claims;

        if payload.is_expired_at(now) {
            return Err(TokenError::ExpiredToken);
        }
        if payload.issued_at > now {
            return Err(TokenError::InvalidToken);
        }
        if payload.token_type != expected {
            tracing::debug!(
                expected = %expected,
                actual = %payload.token_type,
                "token type mismatch"
            );
            return Err(TokenError::InvalidToken);
        }

        Ok(payload)
    }
}

impl core::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}
