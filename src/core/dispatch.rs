//! Routes install, update and remove requests to backends.
//!
//! - **Blind**: first available backend, in registration order, that succeeds
//! - **Targeted**: one named backend, no fallback
//! - **Sweep**: every available backend in turn

use crate::error::{PpmError, Result};
use crate::packages::{BackendRegistry, PackageManager};
use crate::ui as output;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Install,
    Update,
    Remove,
}

impl Operation {
    fn apply(self, manager: &dyn PackageManager, name: &str) -> Result<()> {
        match self {
            Operation::Install => manager.install(name),
            Operation::Update => manager.update(name),
            Operation::Remove => manager.remove(name),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Install => "install",
            Operation::Update => "update",
            Operation::Remove => "remove",
        };
        f.write_str(verb)
    }
}

/// Stateless front for backend mutations.
pub struct Dispatcher<'a> {
    registry: &'a BackendRegistry,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a BackendRegistry) -> Self {
        Self { registry }
    }

    /// Install `name` with the first available backend that succeeds.
    /// Returns the identity of that backend.
    ///
    /// Only the last backend error is kept when every attempt fails.
    pub fn install_blind(&self, name: &str) -> Result<String> {
        let mut last_error = None;

        for manager in self.registry.available_backends() {
            match manager.install(name) {
                Ok(()) => return Ok(manager.identity().to_string()),
                Err(e) => {
                    output::verbose(&format!("{}: {}", manager.identity(), e));
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(PpmError::AggregateInstallFailure {
                package: name.to_string(),
                last: Box::new(last),
            }),
            None => Err(PpmError::NoProviderAvailable),
        }
    }

    /// Run `op` on the backend registered as `identity`, without fallback.
    pub fn run_targeted(&self, op: Operation, name: &str, identity: &str) -> Result<()> {
        let manager = self
            .registry
            .find_by_identity(identity)
            .filter(|m| m.is_available())
            .ok_or_else(|| PpmError::ProviderNotFound(identity.to_string()))?;

        op.apply(manager, name)
    }

    /// Run `op` on every available backend. Succeeds when at least one
    /// backend did; returns the identities that succeeded.
    pub fn run_sweep(&self, op: Operation, name: &str) -> Result<Vec<String>> {
        let mut succeeded = Vec::new();
        let mut last_error = None;

        for manager in self.registry.available_backends() {
            match op.apply(manager, name) {
                Ok(()) => succeeded.push(manager.identity().to_string()),
                Err(e) => {
                    output::warning(&format!("{}: {}", manager.identity(), e));
                    last_error = Some(e);
                }
            }
        }

        if !succeeded.is_empty() {
            return Ok(succeeded);
        }

        match last_error {
            Some(last) => Err(PpmError::AggregateOperationFailure {
                operation: op.to_string(),
                target: if name.is_empty() {
                    "all packages".to_string()
                } else {
                    name.to_string()
                },
                last: Box::new(last),
            }),
            None => Err(PpmError::NoProviderAvailable),
        }
    }
}
