//! # Backend Registry
//!
//! Ordered set of backends this process can dispatch to.
//!
//! The registry is filled once at startup and only read afterwards, so it is
//! shared across search tasks without locking. Registration order is the
//! fallback priority for blind installs.
//!
//! ## Adding a New Backend
//!
//! 1. Create `src/packages/<backend>.rs` with a Manager struct
//! 2. Implement the `PackageManager` trait
//! 3. Add its identity to `BUILTIN_BACKENDS` and construct it in
//!    `builtin_manager()`

use crate::config::Settings;
use crate::error::{PpmError, Result};
use crate::packages::PackageManager;
use std::time::Duration;

/// Built-in backends in default priority order.
pub const BUILTIN_BACKENDS: &[&str] = &["npm", "pip", "scoop"];

#[derive(Default)]
pub struct BackendRegistry {
    managers: Vec<Box<dyn PackageManager>>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            managers: Vec::new(),
        }
    }

    /// Build the registry for this invocation.
    ///
    /// `settings.backends` restricts and reorders the built-ins; otherwise
    /// all of them are registered in `BUILTIN_BACKENDS` order.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut registry = Self::new();
        let selected: Vec<&str> = match &settings.backends {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => BUILTIN_BACKENDS.to_vec(),
        };

        for name in selected {
            let manager = builtin_manager(name, settings.timeout).ok_or_else(|| {
                PpmError::ConfigError(format!(
                    "Unknown backend '{}'. Known backends: {}",
                    name,
                    BUILTIN_BACKENDS.join(", ")
                ))
            })?;
            registry.register(manager);
        }

        Ok(registry)
    }

    /// Append a backend. Registering the same identity twice keeps both.
    pub fn register(&mut self, manager: Box<dyn PackageManager>) {
        self.managers.push(manager);
    }

    /// Every registered backend, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn PackageManager> {
        self.managers.iter().map(|m| m.as_ref())
    }

    /// Backends usable right now. Availability is probed on each call.
    pub fn available_backends(&self) -> impl Iterator<Item = &dyn PackageManager> {
        self.iter().filter(|m| m.is_available())
    }

    /// First backend registered under `identity`.
    pub fn find_by_identity(&self, identity: &str) -> Option<&dyn PackageManager> {
        self.iter().find(|m| m.identity() == identity)
    }

    pub fn identities(&self) -> Vec<&str> {
        self.iter().map(|m| m.identity()).collect()
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

fn builtin_manager(name: &str, timeout: Option<Duration>) -> Option<Box<dyn PackageManager>> {
    match name {
        "npm" => Some(Box::new(crate::packages::npm::NpmManager::new(timeout))),
        "pip" => Some(Box::new(crate::packages::pip::PipManager::new(timeout))),
        "scoop" => Some(Box::new(crate::packages::scoop::ScoopManager::new(
            timeout,
        ))),
        _ => None,
    }
}
