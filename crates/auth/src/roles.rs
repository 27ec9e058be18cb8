use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles are open strings: the permission table decides which ones mean
/// something, so new roles can be introduced without touching call sites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Elevated role holding every permission in the default table.
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));

    /// Restricted role holding only read-class permissions in the default table.
    pub const USER: Role = Role(Cow::Borrowed("user"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::ADMIN).unwrap();
        assert_eq!(json, "\"admin\"");

        let role: Role = serde_json::from_str("\"auditor\"").unwrap();
        assert_eq!(role.as_str(), "auditor");
    }

    #[test]
    fn borrowed_and_owned_roles_compare_equal() {
        assert_eq!(Role::from("user"), Role::USER);
        assert_ne!(Role::from("User"), Role::USER);
    }
}
