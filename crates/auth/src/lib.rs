//! `filmrental-auth`: authentication and authorization core.
//!
//! Token minting and verification, the role → permission table, the two
//! request gates and the login/refresh session flow. Decoupled from HTTP;
//! storage is reached only through [`CredentialStore`].

pub mod authorize;
pub mod claims;
pub mod credentials;
pub mod gate;
pub mod password;
pub mod permissions;
pub mod policy;
pub mod roles;
pub mod session;
pub mod token;

pub use authorize::{AuthzError, PermissionGate};
pub use claims::{TokenPayload, TokenType};
pub use credentials::{CredentialRecord, CredentialStore, StoreError};
pub use gate::{AuthGate, GateError};
pub use password::{Argon2Hasher, CredentialHasher, HashError};
pub use permissions::Permission;
pub use policy::{PermissionTable, RoleDefinition};
pub use roles::Role;
pub use session::{
    validate_credentials, LoginRequest, RefreshRequest, SessionConfig, SessionError,
    SessionIssuer, TokenResponse,
};
pub use token::{TokenCodec, TokenError};
