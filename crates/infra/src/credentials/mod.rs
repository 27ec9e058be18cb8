//! `CredentialStore` implementations.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::InMemoryCredentialStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresCredentialStore;
