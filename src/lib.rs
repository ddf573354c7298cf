pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod packages;
pub mod project_identity;
pub mod ui;
pub mod utils;

use clap::Parser;
use error::PpmError;
use std::process::exit;

/// Exit status used when the operator interrupts the run.
const INTERRUPTED_EXIT: i32 = 130;

/// Run the ppm CLI entrypoint.
pub fn run_cli() {
    let args = cli::args::Cli::parse();
    ui::init_colors(args.global.no_color);
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    // A running package manager receives the same SIGINT and exits on its
    // own; its failure then propagates normally.
    if let Err(e) = ctrlc::set_handler(move || {
        ui::mark_interrupted();
        if !ui::is_backend_busy() {
            eprintln!();
            ui::warning("Operation cancelled by user.");
            exit(INTERRUPTED_EXIT);
        }
    }) {
        ui::warning(&format!("Failed to install Ctrl-C handler: {}", e));
    }

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        let code = if matches!(e, PpmError::Interrupted) {
            INTERRUPTED_EXIT
        } else {
            1
        };
        exit(code);
    }
}
