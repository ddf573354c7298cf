//! `ppm search <query>`
//!
//! Interactive by default: ranked table, pick a number, confirm, install.
//! `--json` prints the ranked report and never installs.

use crate::core::search;
use crate::core::selection::{SelectionSession, SessionOutcome};
use crate::error::Result;
use crate::packages::{BackendRegistry, Package};
use crate::ui as output;
use crate::ui::progress::{self, run_with_progress};
use serde::Serialize;
use std::io;

pub struct SearchOptions {
    pub query: String,
    pub json: bool,
    pub yes: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a str,
    results: &'a [Package],
    searched: &'a [String],
    failed: &'a [String],
}

pub fn run(registry: &BackendRegistry, options: SearchOptions) -> Result<()> {
    if options.json {
        return print_json(registry, &options.query);
    }

    let mut sink = progress::default_sink();
    let stdin = io::stdin();
    let mut session = SelectionSession::new(
        registry,
        &options.query,
        stdin.lock(),
        io::stdout(),
        sink.as_mut(),
    )
    .assume_yes(options.yes);

    match session.run()? {
        SessionOutcome::Installed(package) => {
            output::verbose(&format!("{} installed by {}", package.name, package.provider));
        }
        SessionOutcome::NoMatches | SessionOutcome::Cancelled => {}
    }
    Ok(())
}

fn print_json(registry: &BackendRegistry, query: &str) -> Result<()> {
    let mut sink = progress::default_sink();
    let report = run_with_progress(sink.as_mut(), &format!("Searching for '{}'", query), || {
        search::search_all(registry, query)
    })?;

    let rendered = serde_json::to_string_pretty(&JsonReport {
        query: query.trim(),
        results: &report.results,
        searched: &report.searched,
        failed: &report.failed,
    })?;
    println!("{}", rendered);
    Ok(())
}
