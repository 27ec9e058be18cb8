use std::sync::Arc;

use thiserror::Error;

use filmrental_auth::{
    Argon2Hasher, AuthGate, CredentialHasher, CredentialRecord, CredentialStore, HashError,
    PermissionGate, PermissionTable, Role, SessionConfig, SessionIssuer, StoreError, TokenCodec,
    TokenError,
};
use filmrental_infra::InMemoryCredentialStore;

use crate::app::catalog::FilmCatalog;
use crate::config::Config;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid signing key: {0}")]
    Key(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("DATABASE_URL is set but the binary was built without the `postgres` feature")]
    PostgresDisabled,
}

/// Everything a handler may need, shared behind one `Arc`.
pub struct AppServices {
    pub codec: Arc<TokenCodec>,
    pub auth: AuthGate,
    pub permissions: PermissionGate,
    pub sessions: SessionIssuer,
    pub store: Arc<dyn CredentialStore>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub films: FilmCatalog,
}

impl AppServices {
    pub fn new(
        jwt_secret: &str,
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn CredentialHasher>,
        session: SessionConfig,
    ) -> Result<Self, StartupError> {
        let codec = Arc::new(TokenCodec::new(jwt_secret)?);
        let table = Arc::new(PermissionTable::with_defaults());

        Ok(Self {
            auth: AuthGate::new(codec.clone()),
            permissions: PermissionGate::new(table),
            sessions: SessionIssuer::new(codec.clone(), store.clone(), hasher.clone(), session),
            codec,
            store,
            hasher,
            films: FilmCatalog::new(),
        })
    }

    /// Creates the admin account unless the username already exists.
    /// Returns whether an account was created.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> Result<bool, StartupError> {
        if self.store.find_by_username(username).await?.is_some() {
            tracing::info!(username, "bootstrap admin already present");
            return Ok(false);
        }

        let record = CredentialRecord {
            username: username.to_string(),
            password_hash: self.hasher.hash(password)?,
            role: Role::ADMIN,
        };
        self.store.create(record).await?;
        tracing::info!(username, "bootstrap admin created");
        Ok(true)
    }
}

/// Wires services from configuration. Credentials live in memory unless a
/// `DATABASE_URL` is configured and the `postgres` feature is enabled.
pub async fn build_services(config: &Config) -> Result<AppServices, StartupError> {
    let store = credential_store(config).await?;
    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new());

    let services = AppServices::new(&config.jwt_secret, store, hasher, config.session)?;

    if let Some(admin) = &config.admin {
        services.bootstrap_admin(&admin.username, &admin.password).await?;
    }

    Ok(services)
}

#[cfg(feature = "postgres")]
async fn credential_store(config: &Config) -> Result<Arc<dyn CredentialStore>, StartupError> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("using postgres credential store");
            let store = filmrental_infra::PostgresCredentialStore::connect(url).await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; credentials are kept in memory");
            Ok(Arc::new(InMemoryCredentialStore::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn credential_store(config: &Config) -> Result<Arc<dyn CredentialStore>, StartupError> {
    if config.database_url.is_some() {
        return Err(StartupError::PostgresDisabled);
    }
    tracing::info!("using in-memory credential store");
    Ok(Arc::new(InMemoryCredentialStore::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn services() -> AppServices {
        AppServices::new(
            SECRET,
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(Argon2Hasher::with_params(1024, 1, 1).unwrap()),
            SessionConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = AppServices::new(
            "short",
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(Argon2Hasher::new()),
            SessionConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, StartupError::Key(TokenError::InvalidKeySize { .. })));
    }

    #[tokio::test]
    async fn bootstrap_admin_is_idempotent() {
        let services = services();
        assert!(services.bootstrap_admin("root", "changeme").await.unwrap());
        assert!(!services.bootstrap_admin("root", "other-pass").await.unwrap());

        let record = services.store.find_by_username("root").await.unwrap().unwrap();
        assert_eq!(record.role, Role::ADMIN);
        assert!(services.hasher.verify("changeme", &record.password_hash).unwrap());
    }
}
