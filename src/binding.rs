//! Change-tracking wrapper used by embedders that re-render on mutation.
//!
//! The evaluator raises no events. A binding owns an evaluator (built from a
//! config or handed over ready-made), routes mutations through
//! [`PermissionBinding::update`], bumps a version counter and calls every
//! subscribed observer. Readers that find no evaluator get
//! [`Access::Uninitialized`] rather than a denial.

use std::fmt;

use crate::check::CheckMode;
use crate::config::EvaluatorConfig;
use crate::evaluator::PermissionEvaluator;
use crate::query::PermissionQuery;

/// Outcome of a read through a binding.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Access {
    /// No evaluator is present.
    Uninitialized,
    Allowed,
    Denied,
}

impl Access {
    /// Treats [`Access::Uninitialized`] as denied.
    pub fn is_allowed(&self) -> bool {
        *self == Access::Allowed
    }

    pub fn is_initialized(&self) -> bool {
        *self != Access::Uninitialized
    }
}

impl From<bool> for Access {
    fn from(allowed: bool) -> Self {
        if allowed {
            Access::Allowed
        } else {
            Access::Denied
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Where the bound evaluator came from. A provided instance is never
/// rebuilt from config.
#[derive(Clone, Debug, PartialEq)]
enum Source {
    Empty,
    Config(EvaluatorConfig),
    Instance,
}

type Observer = Box<dyn FnMut(u64)>;

pub struct PermissionBinding<E = PermissionEvaluator> {
    evaluator: Option<E>,
    source: Source,
    version: u64,
    next_subscription: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl<E> PermissionBinding<E>
where
    E: PermissionQuery + From<EvaluatorConfig>,
{
    /// Bind a config, an evaluator, both, or neither. A provided evaluator
    /// takes precedence over the config.
    pub fn new(config: Option<EvaluatorConfig>, evaluator: Option<E>) -> Self {
        match (evaluator, config) {
            (Some(evaluator), _) => Self::from_evaluator(evaluator),
            (None, Some(config)) => Self::from_config(config),
            (None, None) => Self::empty(),
        }
    }

    pub fn from_config(config: EvaluatorConfig) -> Self {
        let evaluator = E::from(config.clone());
        Self::with_source(Some(evaluator), Source::Config(config))
    }

    /// Replace the bound config. The evaluator is rebuilt only when the
    /// config differs from the one it was built from, and never when the
    /// binding holds a provided instance.
    pub fn reconfigure(&mut self, config: EvaluatorConfig) {
        match &self.source {
            Source::Instance => {
                tracing::debug!("binding holds a provided evaluator, config ignored");
            }
            Source::Config(current) if *current == config => {}
            _ => {
                self.evaluator = Some(E::from(config.clone()));
                self.source = Source::Config(config);
                self.bump();
            }
        }
    }
}

impl<E> PermissionBinding<E>
where
    E: PermissionQuery,
{
    pub fn from_evaluator(evaluator: E) -> Self {
        Self::with_source(Some(evaluator), Source::Instance)
    }

    pub fn empty() -> Self {
        Self::with_source(None, Source::Empty)
    }

    fn with_source(evaluator: Option<E>, source: Source) -> Self {
        PermissionBinding {
            evaluator,
            source,
            version: 0,
            next_subscription: 0,
            observers: Vec::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.evaluator.is_some()
    }

    pub fn evaluator(&self) -> Option<&E> {
        self.evaluator.as_ref()
    }

    /// Number of changes observed since the binding was created.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn access(&self, permission: &str) -> Access {
        match &self.evaluator {
            Some(evaluator) => evaluator.is_allowed(permission).into(),
            None => Access::Uninitialized,
        }
    }

    pub fn check_access<I, P>(&self, permissions: I, mode: CheckMode) -> Access
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        match &self.evaluator {
            Some(evaluator) => evaluator.check(permissions, mode).into(),
            None => Access::Uninitialized,
        }
    }

    /// Restriction status of a permission. `None` when uninitialized.
    pub fn is_restricted(&self, permission: &str) -> Option<bool> {
        self.evaluator
            .as_ref()
            .map(|evaluator| evaluator.is_permission_restricted(permission))
    }

    /// Run a read against the bound evaluator. `None` when uninitialized.
    pub fn read<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&E) -> T,
    {
        self.evaluator.as_ref().map(f)
    }

    /// Mutate the bound evaluator and notify observers. Does nothing and
    /// returns `None` when uninitialized.
    pub fn update<T, F>(&mut self, f: F) -> Option<T>
    where
        F: FnOnce(&mut E) -> T,
    {
        let result = self.evaluator.as_mut().map(f)?;
        self.bump();
        Some(result)
    }

    /// Register an observer. It receives the new version after each change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(u64) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn bump(&mut self) {
        self.version += 1;
        tracing::debug!(
            version = self.version,
            observers = self.observers.len(),
            "permission binding changed"
        );
        let version = self.version;
        for (_, observer) in self.observers.iter_mut() {
            observer(version);
        }
    }
}

impl<E> fmt::Debug for PermissionBinding<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionBinding")
            .field("evaluator", &self.evaluator)
            .field("source", &self.source)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Resolve the binding a permission read depends on. A read with no
/// binding in reach is a wiring bug and aborts.
pub fn require<E>(binding: Option<&PermissionBinding<E>>) -> &PermissionBinding<E> {
    match binding {
        Some(binding) => binding,
        None => {
            tracing::error!("permission read outside of a permission binding");
            panic!(
                "permission read outside of a permission binding: \
                 construct a PermissionBinding and pass it to the reader"
            )
        }
    }
}
