//! Infrastructure layer: credential-store adapters for the auth core.

pub mod credentials;

pub use credentials::InMemoryCredentialStore;
#[cfg(feature = "postgres")]
pub use credentials::PostgresCredentialStore;
