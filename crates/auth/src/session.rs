//! Session issuance: login and refresh-token rotation.
//!
//! The only component that touches both the credential store and the token
//! codec. Holds no per-session state; every call stands alone.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credentials::{CredentialStore, StoreError};
use crate::password::{CredentialHasher, HashError};
use crate::token::{TokenCodec, TokenError};
use crate::{Role, TokenType};

pub const TOKEN_TYPE_LABEL: &str = "Bearer";

const USERNAME_LEN: core::ops::RangeInclusive<usize> = 3..=30;
const PASSWORD_LEN: core::ops::RangeInclusive<usize> = 6..=30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Unknown user and wrong password are deliberately indistinguishable.
    #[error("invalid credentials")]
    AuthenticationFailed,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hashing(#[from] HashError),
}

impl SessionError {
    fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }
}

/// Token lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_ttl: Duration::minutes(600),
            refresh_ttl: Duration::days(7),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
}

pub struct SessionIssuer {
    codec: Arc<TokenCodec>,
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn CredentialHasher>,
    config: SessionConfig,
    /// Verified against on unknown usernames so both failure paths pay one hash.
    decoy_hash: Option<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-matches";

impl SessionIssuer {
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn CredentialHasher>,
        config: SessionConfig,
    ) -> Self {
        let decoy_hash = hasher
            .hash(DECOY_PASSWORD)
            .inspect_err(|e| tracing::warn!(error = %e, "could not prepare decoy hash"))
            .ok();
        Self {
            codec,
            store,
            hasher,
            config,
            decoy_hash,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Exchanges username/password for an access + refresh token pair.
    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse, SessionError> {
        validate_credentials(&req.username, &req.password)?;

        let Some(record) = self.store.find_by_username(&req.username).await? else {
            if let Some(decoy) = &self.decoy_hash {
                let _ = self.hasher.verify(&req.password, decoy);
            }
            tracing::info!(username = %req.username, "login rejected: unknown user");
            return Err(SessionError::AuthenticationFailed);
        };

        if !self.hasher.verify(&req.password, &record.password_hash)? {
            tracing::info!(username = %req.username, "login rejected: bad password");
            return Err(SessionError::AuthenticationFailed);
        }

        let response = self.issue_pair(&record.username, &record.role)?;
        tracing::info!(username = %record.username, role = %record.role, "login succeeded");
        Ok(response)
    }

    /// Rotates a refresh token: verifies it, re-checks the account, and
    /// mints a fresh pair for the identity carried by the verified token.
    pub async fn refresh(&self, req: &RefreshRequest) -> Result<TokenResponse, SessionError> {
        if req.refresh_token.trim().is_empty() {
            return Err(SessionError::validation("refresh token is required"));
        }

        let payload = self.codec.verify(&req.refresh_token, TokenType::Refresh)?;

        if self.store.find_by_username(&payload.subject).await?.is_none() {
            tracing::warn!(username = %payload.subject, token_id = %payload.id, "refresh rejected: account no longer exists");
            return Err(SessionError::AuthenticationFailed);
        }

        let response = self.issue_pair(&payload.subject, &payload.role)?;
        tracing::info!(username = %payload.subject, previous_token_id = %payload.id, "refresh token rotated");
        Ok(response)
    }

    fn issue_pair(&self, subject: &str, role: &Role) -> Result<TokenResponse, SessionError> {
        let access_token = self
            .codec
            .mint(subject, role, self.config.access_ttl, TokenType::Access)?;
        let refresh_token = self
            .codec
            .mint(subject, role, self.config.refresh_ttl, TokenType::Refresh)?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_LABEL.to_string(),
            expires_in: self.config.access_ttl.num_seconds(),
        })
    }
}

/// Length rules shared by login and account creation.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), SessionError> {
    validate_len("username", username, USERNAME_LEN)?;
    validate_len("password", password, PASSWORD_LEN)
}

fn validate_len(
    field: &str,
    value: &str,
    bounds: core::ops::RangeInclusive<usize>,
) -> Result<(), SessionError> {
    let len = value.chars().count();
    if bounds.contains(&len) {
        Ok(())
    } else {
        Err(SessionError::validation(format!(
            "{field} must be between {} and {} characters",
            bounds.start(),
            bounds.end()
        )))
    }
}
