//! Interactive search-then-install session.
//!
//! ```text
//! Searching ──▶ Empty                                   (no matches)
//!     │
//!     ▼
//!  Results ──q──▶ Cancelled
//!     │ 1..=N            (anything else: InvalidSelection)
//!     ▼
//!  Detail ──not y──▶ Cancelled
//!     │ y
//!     ▼
//! Installing ──▶ Done            (backend error propagates)
//! ```
//!
//! Every terminal phase ends the session; nothing is retried.

use crate::core::dispatch::{Dispatcher, Operation};
use crate::core::search;
use crate::error::{PpmError, Result};
use crate::packages::{BackendRegistry, Package};
use crate::ui::progress::{ProgressSink, run_with_progress};
use crate::ui::table;
use std::io::{BufRead, Write};

#[derive(Debug)]
enum Phase {
    Searching,
    Results(Vec<Package>),
    Detail(Package),
    Installing(Package),
    Done(Package),
    Empty,
    Cancelled,
}

/// How a session ended without error.
#[derive(Debug, PartialEq)]
pub enum SessionOutcome {
    NoMatches,
    Cancelled,
    Installed(Package),
}

pub struct SelectionSession<'a, R, W> {
    registry: &'a BackendRegistry,
    query: String,
    input: R,
    output: W,
    progress: &'a mut dyn ProgressSink,
    assume_yes: bool,
    /// 1-based index picked by the operator.
    chosen: Option<usize>,
    confirmed: bool,
}

impl<'a, R: BufRead, W: Write> SelectionSession<'a, R, W> {
    pub fn new(
        registry: &'a BackendRegistry,
        query: &str,
        input: R,
        output: W,
        progress: &'a mut dyn ProgressSink,
    ) -> Self {
        Self {
            registry,
            query: query.to_string(),
            input,
            output,
            progress,
            assume_yes: false,
            chosen: None,
            confirmed: false,
        }
    }

    /// Skip the install confirmation prompt.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    pub fn run(&mut self) -> Result<SessionOutcome> {
        let mut phase = Phase::Searching;
        loop {
            phase = match phase {
                Phase::Done(pkg) => return Ok(SessionOutcome::Installed(pkg)),
                Phase::Empty => return Ok(SessionOutcome::NoMatches),
                Phase::Cancelled => return Ok(SessionOutcome::Cancelled),
                active => self.step(active)?,
            };
        }
    }

    fn step(&mut self, phase: Phase) -> Result<Phase> {
        match phase {
            Phase::Searching => self.search(),
            Phase::Results(results) => self.select(results),
            Phase::Detail(pkg) => self.confirm(pkg),
            Phase::Installing(pkg) => self.install(pkg),
            terminal => Ok(terminal),
        }
    }

    fn search(&mut self) -> Result<Phase> {
        let registry = self.registry;
        let query = self.query.clone();
        let report = run_with_progress(
            self.progress,
            &format!("Searching for '{}' across package managers", query),
            || search::search_all(registry, &query),
        )?;

        if report.results.is_empty() {
            writeln!(self.output, "No packages found matching '{}'", self.query)?;
            return Ok(Phase::Empty);
        }
        Ok(Phase::Results(report.results))
    }

    fn select(&mut self, results: Vec<Package>) -> Result<Phase> {
        writeln!(
            self.output,
            "\nFound {} packages matching '{}'\n",
            results.len(),
            self.query
        )?;
        write!(self.output, "{}", table::render_results(&results))?;
        writeln!(self.output, "\nEnter package number to install (or 'q' to quit): ")?;
        self.output.flush()?;

        let input = self.read_line()?;
        match parse_selection(&input, results.len())? {
            None => Ok(Phase::Cancelled),
            Some(index) => {
                self.chosen = Some(index);
                let pkg = results
                    .into_iter()
                    .nth(index - 1)
                    .ok_or_else(|| PpmError::InvalidSelection(input.trim().to_string()))?;
                Ok(Phase::Detail(pkg))
            }
        }
    }

    fn confirm(&mut self, pkg: Package) -> Result<Phase> {
        write!(self.output, "{}", table::render_details(&pkg))?;

        self.confirmed = if self.assume_yes {
            true
        } else {
            write!(self.output, "\nDo you want to install this package? [y/N] ")?;
            self.output.flush()?;
            is_affirmative(&self.read_line()?)
        };

        if self.confirmed {
            Ok(Phase::Installing(pkg))
        } else {
            writeln!(self.output, "Installation cancelled")?;
            Ok(Phase::Cancelled)
        }
    }

    fn install(&mut self, pkg: Package) -> Result<Phase> {
        let dispatcher = Dispatcher::new(self.registry);
        run_with_progress(
            self.progress,
            &format!("Installing {} with {}", pkg.name, pkg.provider),
            || dispatcher.run_targeted(Operation::Install, &pkg.name, &pkg.provider),
        )?;

        writeln!(
            self.output,
            "\n✓ Successfully installed {} via {}",
            pkg.name, pkg.provider
        )?;
        Ok(Phase::Done(pkg))
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line)
    }
}

/// `Ok(None)` for quit, `Ok(Some(i))` for a 1-based index within `len`.
pub fn parse_selection(input: &str, len: usize) -> Result<Option<usize>> {
    let input = input.trim();
    if input == "q" {
        return Ok(None);
    }
    match input.parse::<usize>() {
        Ok(index) if (1..=len).contains(&index) => Ok(Some(index)),
        _ => Err(PpmError::InvalidSelection(input.to_string())),
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests;
