//! Role → permission table.
//!
//! Built once at startup and shared read-only (`Arc<PermissionTable>`), so
//! lookups need no locking.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::permissions::{self, Permission};
use crate::Role;

/// Static authorization policy: which permissions each role holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionTable {
    roles: BTreeMap<Role, BTreeSet<Permission>>,
}

/// Serializable view of a single role, used by listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub name: Role,
    pub permissions: Vec<Permission>,
}

impl PermissionTable {
    /// An empty table: every check denies.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shipped policy: `admin` holds every permission, `user` holds the
    /// read-class permissions only.
    pub fn with_defaults() -> Self {
        Self::empty()
            .grant(Role::ADMIN, permissions::ALL)
            .grant(
                Role::USER,
                permissions::ALL.into_iter().filter(Permission::is_read),
            )
    }

    /// Adds `permissions` to `role`, defining the role if it is new.
    pub fn grant(
        mut self,
        role: impl Into<Role>,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        self.roles
            .entry(role.into())
            .or_default()
            .extend(permissions);
        self
    }

    /// True iff `role` is defined and holds `permission`. Never fails.
    pub fn has_permission(&self, role: &str, permission: &str) -> bool {
        self.roles
            .get(role)
            .is_some_and(|granted| granted.contains(permission))
    }

    pub fn is_valid_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Permissions held by `role`, sorted; empty for unknown roles.
    pub fn permissions_for(&self, role: &str) -> Vec<Permission> {
        self.roles
            .get(role)
            .map(|granted| granted.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.keys()
    }

    pub fn definitions(&self) -> Vec<RoleDefinition> {
        self.roles
            .iter()
            .map(|(name, granted)| RoleDefinition {
                name: name.clone(),
                permissions: granted.iter().cloned().collect(),
            })
            .collect()
    }
}
