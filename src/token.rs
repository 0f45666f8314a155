//! Opaque authorization tokens.
//!
//! Permissions, roles and sectors carry no structure beyond string identity.
//! Nothing here validates a token against a schema; any string is a valid
//! permission, role or sector.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                $name(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(v: &str) -> Self {
                $name(v.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(v: String) -> Self {
                $name(v)
            }
        }

        impl From<&$name> for $name {
            fn from(v: &$name) -> Self {
                v.clone()
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

token!(
    /// Atomic capability whose grant or denial is being decided.
    Permission
);

token!(
    /// Named bundle of permissions assignable to a principal.
    Role
);

token!(
    /// Named context that activates an additional restriction list.
    Sector
);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_token_equality_is_string_identity() {
        assert_eq!(Permission::from("read"), Permission::new(String::from("read")));
        assert_ne!(Permission::from("read"), Permission::from("Read"));
    }

    #[test]
    fn test_lookup_by_str() {
        let set: HashSet<Role> = ["admin", "editor"].iter().copied().map(Role::from).collect();
        assert!(set.contains("admin"));
        assert!(!set.contains("viewer"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Sector::from("finance").to_string(), "finance");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Permission::from("delete")).unwrap();
        assert_eq!(json, "\"delete\"");

        let parsed: Sector = serde_json::from_str("\"hr\"").unwrap();
        assert_eq!(parsed, Sector::from("hr"));
    }
}
