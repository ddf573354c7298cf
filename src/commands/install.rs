//! `ppm install`: blind install by default, targeted with `--backend`.

use crate::core::dispatch::{Dispatcher, Operation};
use crate::error::Result;
use crate::packages::BackendRegistry;
use crate::ui as output;
use crate::ui::progress::{self, run_with_progress};
use crate::utils::sanitize;

pub struct InstallOptions {
    pub package: String,
    pub backend: Option<String>,
}

pub fn run(registry: &BackendRegistry, options: InstallOptions) -> Result<()> {
    let package = options.package.as_str();
    sanitize::validate_package_name(package)?;

    let dispatcher = Dispatcher::new(registry);
    let mut sink = progress::default_sink();

    let used = match options.backend.as_deref() {
        Some(identity) => {
            run_with_progress(
                sink.as_mut(),
                &format!("Installing {} with {}", package, identity),
                || dispatcher.run_targeted(Operation::Install, package, identity),
            )?;
            identity.to_string()
        }
        None => run_with_progress(
            sink.as_mut(),
            &format!("Installing {}", package),
            || dispatcher.install_blind(package),
        )?,
    };

    output::success(&format!("Successfully installed {} via {}", package, used));
    Ok(())
}
