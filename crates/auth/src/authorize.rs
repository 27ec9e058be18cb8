use std::sync::Arc;

use thiserror::Error;

use crate::{Permission, PermissionTable, Role, TokenPayload};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The permission check ran without an authenticated payload in scope.
    /// Indicates mis-wired middleware, not a client mistake.
    #[error("authorization payload not found")]
    PayloadMissing,

    #[error("invalid authorization payload")]
    InvalidPayload,

    #[error("insufficient permissions: '{required_permission}' is not granted to role '{user_role}'")]
    InsufficientPermissions {
        required_permission: Permission,
        user_role: Role,
    },
}

/// Authorizes an already-authenticated request against one permission.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    table: Arc<PermissionTable>,
}

impl PermissionGate {
    pub fn new(table: Arc<PermissionTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Pure policy check: no IO, no panics.
    ///
    /// `payload` is whatever the authentication step attached to the request
    /// scope; only access-token payloads with a subject are acceptable.
    pub fn check(
        &self,
        payload: Option<&TokenPayload>,
        required: &Permission,
    ) -> Result<(), AuthzError> {
        let payload = payload.ok_or(AuthzError::PayloadMissing)?;
        if !payload.is_access() || payload.subject.is_empty() {
            return Err(AuthzError::InvalidPayload);
        }

        if self.table.has_permission(payload.role.as_str(), required.as_str()) {
            Ok(())
        } else {
            Err(AuthzError::InsufficientPermissions {
                required_permission: required.clone(),
                user_role: payload.role.clone(),
            })
        }
    }
}
