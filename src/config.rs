//! Evaluator construction input.
//!
//! Every field is optional and independent of the others. Field names
//! serialize in camelCase (`roleDefinitions`, `sectorRestrictions`).

use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::token::{Permission, Role, Sector};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluatorConfig {
    /// Seeds the direct-permission set.
    pub permissions: Vec<Permission>,
    /// Seeds the assigned-role set.
    pub roles: Vec<Role>,
    /// Seeds the role-definition table.
    pub role_definitions: HashMap<Role, Vec<Permission>>,
    /// Seeds the direct-restriction set.
    pub restrictions: Vec<Permission>,
    /// Seeds the current sector.
    pub sector: Option<Sector>,
    /// Seeds the sector-restriction table.
    pub sector_restrictions: HashMap<Sector, Vec<Permission>>,
}

impl EvaluatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration object.
    pub fn from_json_reader<R: Read>(mut reader: R) -> Result<Self, ConfigError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    pub fn with_permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Define one role. Replaces an earlier definition of the same role.
    pub fn with_role_definition<I, P>(mut self, role: impl Into<Role>, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.role_definitions.insert(
            role.into(),
            permissions.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_restrictions<I, P>(mut self, restrictions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.restrictions
            .extend(restrictions.into_iter().map(Into::into));
        self
    }

    pub fn with_sector(mut self, sector: impl Into<Sector>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Set one sector's restriction list. Replaces an earlier list for the
    /// same sector.
    pub fn with_sector_restriction<I, P>(mut self, sector: impl Into<Sector>, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.sector_restrictions.insert(
            sector.into(),
            permissions.into_iter().map(Into::into).collect(),
        );
        self
    }
}
