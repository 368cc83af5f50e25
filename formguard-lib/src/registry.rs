//! Registry of live validators.
//!
//! The host owns one [`ValidatorRegistry`] per form set (or per process) and
//! hands it to every [`Validator`] and [`ContainerValidator`] it creates. A
//! validator joins the registry when it is created and leaves when its handle
//! is released, so a container can find every validator bound inside it
//! without anything owning the validators.
//!
//! [`ContainerValidator`]: crate::container::ContainerValidator

use std::sync::{Arc, PoisonError, RwLock};

use crate::validator::{Validator, ValidatorId};

#[derive(Default)]
struct RegistryInner {
    /// Live validators in registration order.
    entries: Vec<Validator>,
}

/// Shared, insertion-ordered set of live validators.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl ValidatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator. Returns false if it is already registered.
    pub fn register(&self, validator: &Validator) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.entries.iter().any(|v| v.id() == validator.id()) {
            return false;
        }
        guard.entries.push(validator.clone());
        log::debug!(
            "registered validator {} ({} live)",
            validator.id(),
            guard.entries.len()
        );
        true
    }

    /// Remove a validator. Returns false if it was not registered.
    pub fn deregister(&self, id: ValidatorId) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let Some(pos) = guard.entries.iter().position(|v| v.id() == id) else {
            log::debug!("validator {} was not registered", id);
            return false;
        };
        guard.entries.remove(pos);
        log::debug!("deregistered validator {} ({} live)", id, guard.entries.len());
        true
    }

    /// Check if a validator is registered.
    pub fn contains(&self, id: ValidatorId) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .any(|v| v.id() == id)
    }

    /// Number of live validators.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current membership, in registration order.
    ///
    /// Scans iterate over a snapshot so validators may be registered or
    /// released while a scan is running (for example from a custom rule).
    pub fn snapshot(&self) -> Vec<Validator> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clone()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("len", &self.len())
            .finish()
    }
}
