use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use filmrental_auth::{CredentialRecord, CredentialStore, StoreError};

/// In-memory credential store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<BTreeMap<String, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("credential store lock poisoned")
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(username).cloned())
    }

    async fn create(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.contains_key(&record.username) {
            return Err(StoreError::Conflict(record.username));
        }
        map.insert(record.username.clone(), record);
        Ok(())
    }

    async fn delete(&self, username: &str) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let removed = map.remove(username).is_some();
        if removed {
            tracing::info!(username, "credential removed");
        }
        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }
}
