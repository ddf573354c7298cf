//! `ppm update [package]`
//!
//! With `--backend` one package manager is asked; otherwise every available
//! one is. An omitted package means "update everything".

use crate::core::dispatch::{Dispatcher, Operation};
use crate::error::Result;
use crate::packages::BackendRegistry;
use crate::ui as output;
use crate::ui::progress::{self, run_with_progress};
use crate::utils::sanitize;

pub struct UpdateOptions {
    pub package: Option<String>,
    pub backend: Option<String>,
}

pub fn run(registry: &BackendRegistry, options: UpdateOptions) -> Result<()> {
    let name = options.package.as_deref().unwrap_or("");
    if !name.is_empty() {
        sanitize::validate_package_name(name)?;
    }
    let label = if name.is_empty() { "all packages" } else { name };

    let dispatcher = Dispatcher::new(registry);
    let mut sink = progress::default_sink();

    let updated = match options.backend.as_deref() {
        Some(identity) => {
            run_with_progress(
                sink.as_mut(),
                &format!("Updating {} with {}", label, identity),
                || dispatcher.run_targeted(Operation::Update, name, identity),
            )?;
            vec![identity.to_string()]
        }
        None => run_with_progress(sink.as_mut(), &format!("Updating {}", label), || {
            dispatcher.run_sweep(Operation::Update, name)
        })?,
    };

    output::success(&format!("Updated {} via {}", label, updated.join(", ")));
    Ok(())
}
