//! Sector-aware permission evaluation.
//!
//! A [`PermissionEvaluator`] answers "is this permission allowed?" from four
//! independent inputs: directly granted permissions, assigned roles and the
//! permissions each role confers, explicit restrictions, and an optional
//! current sector with its own restriction list.
//!
//! ```text
//! allowed(p) = !restricted(p) && (direct(p) || any role grants p)
//! restricted(p) = p in restrictions || p in restrictions[current sector]
//! ```
//!
//! Restrictions always win. Evaluation is synchronous, total and uncached.
//!
//! ```
//! use sector_authz::{CheckMode, EvaluatorConfig, PermissionEvaluator};
//!
//! let mut ev = PermissionEvaluator::new(
//!     EvaluatorConfig::new()
//!         .with_permissions(["delete"])
//!         .with_sector("finance")
//!         .with_sector_restriction("finance", ["delete"]),
//! );
//! assert!(!ev.is_allowed("delete"));
//!
//! ev.set_sector(Some("hr"));
//! assert!(ev.is_allowed("delete"));
//! assert!(ev.check(["delete"], CheckMode::Every));
//! ```

pub mod binding;
pub mod check;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod query;
pub mod summary;
pub mod token;

pub use binding::{require, Access, PermissionBinding, SubscriptionId};
pub use check::CheckMode;
pub use config::EvaluatorConfig;
pub use error::ConfigError;
pub use evaluator::PermissionEvaluator;
pub use query::PermissionQuery;
pub use summary::PermissionSummary;
pub use token::{Permission, Role, Sector};
