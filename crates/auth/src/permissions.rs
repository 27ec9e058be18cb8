use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque `resource:action` strings (e.g. "film:create") and
/// are checked independently of role identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Action half of `resource:action`, if present.
    pub fn action(&self) -> Option<&str> {
        self.as_str().split_once(':').map(|(_, action)| action)
    }

    pub fn is_read(&self) -> bool {
        self.action() == Some("read")
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

impl Permission {
    pub const FILM_READ: Permission = Permission::from_static("film:read");
    pub const FILM_CREATE: Permission = Permission::from_static("film:create");
    pub const FILM_UPDATE: Permission = Permission::from_static("film:update");
    pub const FILM_DELETE: Permission = Permission::from_static("film:delete");

    pub const STAFF_READ: Permission = Permission::from_static("staff:read");
    pub const STAFF_CREATE: Permission = Permission::from_static("staff:create");
    pub const STAFF_UPDATE: Permission = Permission::from_static("staff:update");
    pub const STAFF_DELETE: Permission = Permission::from_static("staff:delete");

    pub const USER_READ: Permission = Permission::from_static("user:read");
    pub const USER_CREATE: Permission = Permission::from_static("user:create");
    pub const USER_UPDATE: Permission = Permission::from_static("user:update");
    pub const USER_DELETE: Permission = Permission::from_static("user:delete");
}

/// Every permission the service knows about, grouped by resource.
pub const ALL: [Permission; 12] = [
    Permission::FILM_READ,
    Permission::FILM_CREATE,
    Permission::FILM_UPDATE,
    Permission::FILM_DELETE,
    Permission::STAFF_READ,
    Permission::STAFF_CREATE,
    Permission::STAFF_UPDATE,
    Permission::STAFF_DELETE,
    Permission::USER_READ,
    Permission::USER_CREATE,
    Permission::USER_UPDATE,
    Permission::USER_DELETE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_class_is_derived_from_action() {
        assert!(Permission::FILM_READ.is_read());
        assert!(!Permission::FILM_CREATE.is_read());
        assert!(!Permission::new("films").is_read());
    }

    #[test]
    fn catalog_has_four_actions_per_resource() {
        let reads = ALL.iter().filter(|p| p.is_read()).count();
        assert_eq!(reads, 3);
        assert_eq!(ALL.len(), 12);
    }

    #[test]
    fn associated_constants_use_resource_action_names() {
        assert_eq!(Permission::FILM_CREATE.as_str(), "film:create");
        assert_eq!(Permission::STAFF_DELETE.as_str(), "staff:delete");
        assert_eq!(Permission::USER_READ, Permission::from("user:read"));
        assert!(ALL.contains(&Permission::FILM_UPDATE));
    }
}
