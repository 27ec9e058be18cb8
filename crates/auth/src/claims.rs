use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Role;

/// Class of a token. A token minted as one class never verifies as the other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived credential authorizing individual requests.
    Access,
    /// Long-lived credential used only to mint new access tokens.
    Refresh,
}

impl core::fmt::Display for TokenType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// Verified claim set carried inside a token.
///
/// Reconstructed from the signed wire form on every verification; nothing
/// about it is stored server-side. Timestamps travel as whole seconds under
/// the registered JWT names (`iat`, `exp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Unique per minted token (`jti`), reserved for a future deny-list.
    #[serde(rename = "jti")]
    pub id: Uuid,

    /// Username of the principal.
    #[serde(rename = "sub")]
    pub subject: String,

    pub role: Role,

    pub token_type: TokenType,

    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl TokenPayload {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_access(&self) -> bool {
        self.token_type == TokenType::Access
    }
}
