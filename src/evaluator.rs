//! Permission evaluation over mutable grant and restriction state.
//!
//! Resolution of a single permission, first match wins:
//!
//! 1. restricted, directly or by the current sector: denied
//! 2. directly granted: allowed
//! 3. granted by any assigned role: allowed
//! 4. otherwise: denied
//!
//! Restrictions always win, no matter how many sources grant the permission.
//! Nothing is cached; every query reads the current state.
//!
//! Every accessor hands back an owned copy. Callers cannot reach internal
//! state through a returned collection.

use std::collections::{HashMap, HashSet};

use crate::check::CheckMode;
use crate::config::EvaluatorConfig;
use crate::query::PermissionQuery;
use crate::summary::PermissionSummary;
use crate::token::{Permission, Role, Sector};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionEvaluator {
    permissions: HashSet<Permission>,
    roles: HashSet<Role>,
    role_definitions: HashMap<Role, Vec<Permission>>,
    restrictions: HashSet<Permission>,
    sector: Option<Sector>,
    sector_restrictions: HashMap<Sector, Vec<Permission>>,
}

fn collect_list<I, P>(permissions: I) -> Vec<Permission>
where
    I: IntoIterator<Item = P>,
    P: Into<Permission>,
{
    permissions.into_iter().map(Into::into).collect()
}

impl PermissionEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        let EvaluatorConfig {
            permissions,
            roles,
            role_definitions,
            restrictions,
            sector,
            sector_restrictions,
        } = config;

        let evaluator = PermissionEvaluator {
            permissions: permissions.into_iter().collect(),
            roles: roles.into_iter().collect(),
            role_definitions,
            restrictions: restrictions.into_iter().collect(),
            sector,
            sector_restrictions,
        };

        tracing::debug!(
            permissions = evaluator.permissions.len(),
            roles = evaluator.roles.len(),
            restrictions = evaluator.restrictions.len(),
            sector = ?evaluator.sector,
            "permission evaluator created"
        );

        evaluator
    }

    // ---- queries ----

    /// Determine if a permission is allowed in the current state.
    pub fn is_allowed(&self, permission: &str) -> bool {
        if self.is_permission_restricted(permission) {
            tracing::trace!(permission, "denied by restriction");
            return false;
        }

        if self.permissions.contains(permission) {
            return true;
        }

        let by_role = self
            .roles
            .iter()
            .any(|role| self.role_grants(role, permission));
        if !by_role {
            tracing::trace!(permission, "denied, no grant");
        }
        by_role
    }

    /// Check several permissions. Each is resolved independently.
    pub fn check<I, P>(&self, permissions: I, mode: CheckMode) -> bool
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        mode.evaluate(permissions, |p| self.is_allowed(p.as_ref()))
    }

    pub fn is_allowed_any<I, P>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        self.check(permissions, CheckMode::Some)
    }

    pub fn is_allowed_all<I, P>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        self.check(permissions, CheckMode::Every)
    }

    /// Determine if a permission is restricted, directly or by the current
    /// sector. Grants are not consulted.
    pub fn is_permission_restricted(&self, permission: &str) -> bool {
        self.restrictions.contains(permission)
            || self
                .current_sector_list()
                .iter()
                .any(|p| p.as_str() == permission)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn has_roles<I, R>(&self, roles: I, mode: CheckMode) -> bool
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        mode.evaluate(roles, |r| self.has_role(r.as_ref()))
    }

    /// Role-list check with the role default, [`CheckMode::ROLES_DEFAULT`].
    pub fn has_any_role<I, R>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        self.has_roles(roles, CheckMode::ROLES_DEFAULT)
    }

    pub fn has_all_roles<I, R>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        self.has_roles(roles, CheckMode::Every)
    }

    // ---- inspection ----

    pub fn direct_permissions(&self) -> HashSet<Permission> {
        self.permissions.clone()
    }

    /// Permissions conferred by assigned roles, before restrictions apply.
    pub fn role_permissions(&self) -> HashSet<Permission> {
        self.roles
            .iter()
            .filter_map(|role| self.role_definitions.get(role))
            .flatten()
            .cloned()
            .collect()
    }

    /// Definition of one role. Empty when the role is undefined.
    pub fn permissions_for_role(&self, role: &str) -> Vec<Permission> {
        self.role_definitions.get(role).cloned().unwrap_or_default()
    }

    /// Effective permission set: direct and role grants minus everything
    /// currently restricted.
    pub fn all_permissions(&self) -> HashSet<Permission> {
        self.permissions
            .iter()
            .cloned()
            .chain(self.role_permissions())
            .filter(|p| !self.is_permission_restricted(p.as_str()))
            .collect()
    }

    pub fn roles(&self) -> HashSet<Role> {
        self.roles.clone()
    }

    pub fn role_definitions(&self) -> HashMap<Role, Vec<Permission>> {
        self.role_definitions.clone()
    }

    /// Direct restrictions only.
    pub fn restrictions(&self) -> HashSet<Permission> {
        self.restrictions.clone()
    }

    /// Direct restrictions plus the current sector's list.
    pub fn all_restrictions(&self) -> HashSet<Permission> {
        self.restrictions
            .iter()
            .chain(self.current_sector_list())
            .cloned()
            .collect()
    }

    pub fn sector(&self) -> Option<Sector> {
        self.sector.clone()
    }

    pub fn sector_restrictions(&self) -> HashMap<Sector, Vec<Permission>> {
        self.sector_restrictions.clone()
    }

    /// Restriction list of one sector. Empty when the sector has no entry.
    pub fn restrictions_for_sector(&self, sector: &str) -> Vec<Permission> {
        self.sector_restrictions
            .get(sector)
            .cloned()
            .unwrap_or_default()
    }

    pub fn current_sector_restrictions(&self) -> Vec<Permission> {
        self.current_sector_list().to_vec()
    }

    pub fn summary(&self) -> PermissionSummary {
        PermissionSummary::from(self)
    }

    // ---- replace ----

    pub fn set_permissions<I, P>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        tracing::debug!(total = self.permissions.len(), "direct permissions replaced");
    }

    pub fn set_roles<I, R>(&mut self, roles: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        tracing::debug!(total = self.roles.len(), "roles replaced");
    }

    pub fn set_role_definitions<I, R, L, P>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = (R, L)>,
        R: Into<Role>,
        L: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.role_definitions = definitions
            .into_iter()
            .map(|(role, list)| (role.into(), collect_list(list)))
            .collect();
        tracing::debug!(
            total = self.role_definitions.len(),
            "role definitions replaced"
        );
    }

    pub fn set_restrictions<I, P>(&mut self, restrictions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.restrictions = restrictions.into_iter().map(Into::into).collect();
        tracing::debug!(total = self.restrictions.len(), "restrictions replaced");
    }

    pub fn set_sector_restrictions<I, S, L, P>(&mut self, table: I)
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<Sector>,
        L: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.sector_restrictions = table
            .into_iter()
            .map(|(sector, list)| (sector.into(), collect_list(list)))
            .collect();
        tracing::debug!(
            total = self.sector_restrictions.len(),
            "sector restrictions replaced"
        );
    }

    /// Change the current sector. `None` clears it.
    pub fn set_sector<S>(&mut self, sector: Option<S>)
    where
        S: Into<Sector>,
    {
        self.sector = sector.map(Into::into);
        tracing::debug!(sector = ?self.sector, "sector changed");
    }

    // ---- incremental ----

    pub fn add_permissions<I, P>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        tracing::debug!(total = self.permissions.len(), "direct permissions added");
    }

    pub fn remove_permissions<I, P>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        for p in permissions {
            self.permissions.remove(p.as_ref());
        }
        tracing::debug!(total = self.permissions.len(), "direct permissions removed");
    }

    pub fn add_roles<I, R>(&mut self, roles: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        tracing::debug!(total = self.roles.len(), "roles added");
    }

    pub fn remove_roles<I, R>(&mut self, roles: I)
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        for r in roles {
            self.roles.remove(r.as_ref());
        }
        tracing::debug!(total = self.roles.len(), "roles removed");
    }

    pub fn add_restrictions<I, P>(&mut self, restrictions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.restrictions
            .extend(restrictions.into_iter().map(Into::into));
        tracing::debug!(total = self.restrictions.len(), "restrictions added");
    }

    pub fn remove_restrictions<I, P>(&mut self, restrictions: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        for p in restrictions {
            self.restrictions.remove(p.as_ref());
        }
        tracing::debug!(total = self.restrictions.len(), "restrictions removed");
    }

    /// Empty the direct restrictions. Sector restrictions are kept.
    pub fn clear_restrictions(&mut self) {
        self.restrictions.clear();
        tracing::debug!("restrictions cleared");
    }

    // ---- per entry ----

    /// Set one role's permission list, leaving other roles alone.
    pub fn define_role<I, P>(&mut self, role: impl Into<Role>, permissions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let role = role.into();
        let list = collect_list(permissions);
        tracing::debug!(role = %role, permissions = list.len(), "role defined");
        self.role_definitions.insert(role, list);
    }

    pub fn undefine_role(&mut self, role: &str) {
        if self.role_definitions.remove(role).is_some() {
            tracing::debug!(role, "role undefined");
        }
    }

    /// Set one sector's restriction list, leaving other sectors alone.
    pub fn define_sector_restrictions<I, P>(&mut self, sector: impl Into<Sector>, permissions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let sector = sector.into();
        let list = collect_list(permissions);
        tracing::debug!(sector = %sector, restrictions = list.len(), "sector restrictions defined");
        self.sector_restrictions.insert(sector, list);
    }

    pub fn undefine_sector_restrictions(&mut self, sector: &str) {
        if self.sector_restrictions.remove(sector).is_some() {
            tracing::debug!(sector, "sector restrictions undefined");
        }
    }

    fn role_grants(&self, role: &Role, permission: &str) -> bool {
        self.role_definitions
            .get(role)
            .map_or(false, |list| list.iter().any(|p| p.as_str() == permission))
    }

    fn current_sector_list(&self) -> &[Permission] {
        self.sector
            .as_ref()
            .and_then(|sector| self.sector_restrictions.get(sector))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl From<EvaluatorConfig> for PermissionEvaluator {
    fn from(config: EvaluatorConfig) -> Self {
        PermissionEvaluator::new(config)
    }
}

impl PermissionQuery for PermissionEvaluator {
    fn is_allowed(&self, permission: &str) -> bool {
        PermissionEvaluator::is_allowed(self, permission)
    }

    fn is_permission_restricted(&self, permission: &str) -> bool {
        PermissionEvaluator::is_permission_restricted(self, permission)
    }

    fn all_permissions(&self) -> HashSet<Permission> {
        PermissionEvaluator::all_permissions(self)
    }

    fn all_restrictions(&self) -> HashSet<Permission> {
        PermissionEvaluator::all_restrictions(self)
    }

    fn sector(&self) -> Option<Sector> {
        PermissionEvaluator::sector(self)
    }
}
