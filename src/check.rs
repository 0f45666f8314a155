//! Multi-value check combinators.
//!
//! A check over several values resolves each value independently and then
//! combines the results. `Some` requires at least one success; `Every`
//! requires that nothing fails. An empty input therefore never satisfies
//! `Some` and always satisfies `Every`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// At least one value must pass.
    Some,
    /// Every value must pass.
    Every,
}

impl CheckMode {
    /// Combinator used for permission lists when no mode is given.
    pub const PERMISSIONS_DEFAULT: CheckMode = CheckMode::Every;

    /// Combinator used for role lists when no mode is given. Differs from
    /// [`CheckMode::PERMISSIONS_DEFAULT`].
    pub const ROLES_DEFAULT: CheckMode = CheckMode::Some;

    /// Combine `test` over `items`. Stops at the first value that decides
    /// the outcome.
    pub fn evaluate<I, F>(self, items: I, mut test: F) -> bool
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> bool,
    {
        match self {
            CheckMode::Some => items.into_iter().any(|item| test(item)),
            CheckMode::Every => items.into_iter().all(|item| test(item)),
        }
    }
}

impl Default for CheckMode {
    fn default() -> Self {
        CheckMode::PERMISSIONS_DEFAULT
    }
}
