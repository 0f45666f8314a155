//! Diagnostic snapshot of an evaluator.
//!
//! Collections are sorted so that two snapshots of the same state render
//! identically.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::evaluator::PermissionEvaluator;
use crate::token::{Permission, Role, Sector};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSummary {
    pub permissions: BTreeSet<Permission>,
    pub roles: BTreeSet<Role>,
    pub restrictions: BTreeSet<Permission>,
    pub sector: Option<Sector>,
    /// Restriction list of the current sector.
    pub sector_restrictions: Vec<Permission>,
    pub all_permissions: BTreeSet<Permission>,
    pub all_restrictions: BTreeSet<Permission>,
    pub role_definitions: BTreeMap<Role, Vec<Permission>>,
}

impl PermissionSummary {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&PermissionEvaluator> for PermissionSummary {
    fn from(evaluator: &PermissionEvaluator) -> Self {
        PermissionSummary {
            permissions: evaluator.direct_permissions().into_iter().collect(),
            roles: evaluator.roles().into_iter().collect(),
            restrictions: evaluator.restrictions().into_iter().collect(),
            sector: evaluator.sector(),
            sector_restrictions: evaluator.current_sector_restrictions(),
            all_permissions: evaluator.all_permissions().into_iter().collect(),
            all_restrictions: evaluator.all_restrictions().into_iter().collect(),
            role_definitions: evaluator.role_definitions().into_iter().collect(),
        }
    }
}
