//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::config::Settings;
use crate::error::{PpmError, Result};
use crate::packages::BackendRegistry;
use crate::project_identity;
use crate::ui as output;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    let settings = Settings::from_flags(&args.global)?;

    let Some(command) = &args.command else {
        print_quick_start();
        return Ok(());
    };

    if let Command::Completions { shell } = command {
        return commands::completions::run(*shell);
    }

    // Registered once; read-only for the rest of the command.
    let registry = BackendRegistry::from_settings(&settings)?;
    output::verbose(&format!(
        "Registered backends: {}",
        registry.identities().join(", ")
    ));

    let result = match command {
        Command::Install { package, backend } => commands::install::run(
            &registry,
            commands::install::InstallOptions {
                package: package.clone(),
                backend: backend.clone(),
            },
        ),

        Command::Search { query, json } => commands::search::run(
            &registry,
            commands::search::SearchOptions {
                query: query.clone(),
                json: *json,
                yes: settings.assume_yes,
            },
        ),

        Command::Update { package, backend } => commands::update::run(
            &registry,
            commands::update::UpdateOptions {
                package: package.clone(),
                backend: backend.clone(),
            },
        ),

        Command::Remove { package, backend } => commands::remove::run(
            &registry,
            commands::remove::RemoveOptions {
                package: package.clone(),
                backend: backend.clone(),
                yes: settings.assume_yes,
            },
        ),

        Command::Backends => commands::backends::run(&registry),

        Command::Completions { .. } => Ok(()),
    };

    // A package manager killed by Ctrl-C fails like any other; report the
    // interruption instead of its exit status.
    if result.is_err() && output::is_interrupted() {
        return Err(PpmError::Interrupted);
    }
    result
}

fn print_quick_start() {
    output::info("No command provided.");
    output::info("Quick start:");
    output::indent(&project_identity::cli_with("search left-pad"), 2);
    output::indent(&project_identity::cli_with("install left-pad"), 2);
    output::indent(&project_identity::cli_with("install requests --backend pip"), 2);
    output::indent(&project_identity::cli_with("update"), 2);
    output::info(&format!(
        "Use `{} --help` for full command list.",
        project_identity::BINARY_NAME
    ));
}
