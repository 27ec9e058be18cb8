//! Credential hashing (one-way, salted, Argon2id PHC strings).

use argon2::password_hash::{self, rand_core::OsRng, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("stored password hash is malformed")]
    MalformedHash,

    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// One-way password hashing capability.
///
/// `verify` returns `Ok(false)` for a wrong password; `Err` is reserved for
/// hashes that cannot be evaluated at all.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HashError>;
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, HashError>;
}

/// Argon2id hasher with per-password random salts.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Library-recommended Argon2id parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Custom cost parameters (memory in KiB, iterations, lanes).
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, HashError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| HashError::InvalidParams(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(stored_hash).map_err(|_| HashError::MalformedHash)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::Hashing(e.to_string())),
        }
    }
}

impl core::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}
