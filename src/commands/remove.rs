//! `ppm remove <package>`

use crate::core::dispatch::{Dispatcher, Operation};
use crate::error::Result;
use crate::packages::BackendRegistry;
use crate::ui as output;
use crate::ui::progress::{self, run_with_progress};
use crate::utils::sanitize;

pub struct RemoveOptions {
    pub package: String,
    pub backend: Option<String>,
    pub yes: bool,
}

pub fn run(registry: &BackendRegistry, options: RemoveOptions) -> Result<()> {
    let package = options.package.as_str();
    sanitize::validate_package_name(package)?;

    let dispatcher = Dispatcher::new(registry);

    let removed = match options.backend.as_deref() {
        Some(identity) => {
            let mut sink = progress::default_sink();
            run_with_progress(
                sink.as_mut(),
                &format!("Removing {} with {}", package, identity),
                || dispatcher.run_targeted(Operation::Remove, package, identity),
            )?;
            vec![identity.to_string()]
        }
        None => {
            if !options.yes
                && !output::prompt_yes_no(&format!(
                    "Remove '{}' from every available package manager?",
                    package
                ))
            {
                output::info("Removal cancelled");
                return Ok(());
            }
            let mut sink = progress::default_sink();
            run_with_progress(sink.as_mut(), &format!("Removing {}", package), || {
                dispatcher.run_sweep(Operation::Remove, package)
            })?
        }
    };

    output::success(&format!("Removed {} via {}", package, removed.join(", ")));
    Ok(())
}
