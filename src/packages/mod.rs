//! # Package Manager Implementations
//!
//! Every backend is wrapped behind the `PackageManager` trait:
//!
//! - **npm** (`npm.rs`): global Node.js packages
//! - **pip** (`pip.rs`): Python packages
//! - **scoop** (`scoop.rs`): Windows bucket apps
//!
//! Adapters shell out through `command::BackendCommand` and translate the
//! tool's output into [`Package`] values. The orchestration layer in
//! `crate::core` only ever talks to the trait.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ppm::config::Settings;
//! use ppm::packages::BackendRegistry;
//!
//! let registry = BackendRegistry::from_settings(&Settings::default())?;
//! for manager in registry.available_backends() {
//!     println!("{} is available", manager.identity());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod command;
pub mod npm;
pub mod pip;
pub mod registry;
pub mod scoop;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use registry::BackendRegistry;
pub use traits::{Package, PackageManager};
