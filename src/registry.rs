//! Ecosystem name → adapter lookup.

use std::sync::Arc;

use crate::adapters::{Adapter, Manager, ShellAdapter};
use crate::error::RegistryError;
use crate::exec::Executor;

/// Maps ecosystem names to their install adapters.
///
/// Built once at process start and read-only afterwards. Passed explicitly
/// into the driver rather than living in ambient global state, so tests can
/// install fake adapters.
#[derive(Default)]
pub struct Registry {
    adapters: Vec<Box<dyn Adapter>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("ecosystems", &self.ecosystems().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    /// Empty registry. Use [`Registry::register`] to add adapters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in shell adapters (brew, cask, gem, npm, mas),
    /// all sharing the given executor.
    #[must_use]
    pub fn with_defaults(executor: Arc<dyn Executor>) -> Self {
        let mut registry = Self::new();
        for manager in Manager::ALL {
            registry.register(Box::new(ShellAdapter::new(manager, Arc::clone(&executor))));
        }
        registry
    }

    /// Add an adapter. On duplicate ecosystem names the earliest registration
    /// wins (resolution scans in registration order).
    pub fn register(&mut self, adapter: Box<dyn Adapter>) {
        self.adapters.push(adapter);
    }

    /// Look up the adapter for an ecosystem name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEcosystem`] if nothing is registered
    /// under that name. The driver treats this as a per-list failure, not a
    /// fatal abort.
    pub fn resolve(&self, ecosystem: &str) -> Result<&dyn Adapter, RegistryError> {
        self.adapters
            .iter()
            .find(|a| a.ecosystem() == ecosystem)
            .map(AsRef::as_ref)
            .ok_or_else(|| RegistryError::UnknownEcosystem(ecosystem.to_string()))
    }

    /// Registered ecosystem names in registration order.
    pub fn ecosystems(&self) -> impl Iterator<Item = &str> {
        self.adapters.iter().map(|a| a.ecosystem())
    }
}
