use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Stored credential for one staff account.
///
/// Owned by the persistence layer; the auth core only reads it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl core::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("username '{0}' already exists")]
    Conflict(String),

    #[error("credential store failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Narrow persistence contract used by the session issuer and staff routes.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, StoreError>;

    /// Inserts a new record; `StoreError::Conflict` if the username is taken.
    async fn create(&self, record: CredentialRecord) -> Result<(), StoreError>;

    /// Removes an account; `Ok(false)` if it did not exist.
    async fn delete(&self, username: &str) -> Result<bool, StoreError>;

    /// All records, ordered by username.
    async fn list(&self) -> Result<Vec<CredentialRecord>, StoreError>;
}
