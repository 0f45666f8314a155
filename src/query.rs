//! Read-only permission queries.

use std::collections::HashSet;

use crate::check::CheckMode;
use crate::token::{Permission, Sector};

/// Narrow read-only view over an authorization state. Anything that can
/// answer these questions can back a [`PermissionBinding`](crate::PermissionBinding)
/// read.
pub trait PermissionQuery {
    /// Determine if a single permission is allowed.
    fn is_allowed(&self, permission: &str) -> bool;

    /// Determine if a permission is denied by an active restriction,
    /// independent of whether it is granted.
    fn is_permission_restricted(&self, permission: &str) -> bool;

    /// Effective permission set. Always a fresh copy.
    fn all_permissions(&self) -> HashSet<Permission>;

    /// Effective restriction set. Always a fresh copy.
    fn all_restrictions(&self) -> HashSet<Permission>;

    /// Current sector, if any.
    fn sector(&self) -> Option<Sector>;

    /// Check several permissions at once. Each permission is resolved on its own.
    fn check<I, P>(&self, permissions: I, mode: CheckMode) -> bool
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
        Self: Sized,
    {
        mode.evaluate(permissions, |p| self.is_allowed(p.as_ref()))
    }

    fn is_allowed_any<I, P>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
        Self: Sized,
    {
        self.check(permissions, CheckMode::Some)
    }

    fn is_allowed_all<I, P>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
        Self: Sized,
    {
        self.check(permissions, CheckMode::Every)
    }
}
