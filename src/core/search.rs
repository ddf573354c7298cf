//! Concurrent search across every available backend.
//!
//! One scoped thread per backend, all joined before ranking. A backend that
//! errors or panics contributes no results; it never aborts the search.

use crate::error::{PpmError, Result};
use crate::packages::{BackendRegistry, Package, PackageManager};
use crate::ui as output;
use std::cmp::Ordering;
use std::thread;

/// Outcome of one fan-out search.
#[derive(Debug, Default)]
pub struct SearchReport {
    /// Ranked results, best first.
    pub results: Vec<Package>,
    /// Backends that were queried, in registration order.
    pub searched: Vec<String>,
    /// Backends whose search failed or panicked.
    pub failed: Vec<String>,
}

enum BackendOutcome {
    Found(Vec<Package>),
    Failed(String),
}

/// Search all available backends and rank the merged results.
pub fn search_all(registry: &BackendRegistry, query: &str) -> Result<SearchReport> {
    let query = query.trim();
    if query.is_empty() {
        return Err(PpmError::EmptyQuery);
    }

    let backends: Vec<&dyn PackageManager> = registry.available_backends().collect();
    let outcomes: Vec<(String, BackendOutcome)> = thread::scope(|scope| {
        let handles: Vec<_> = backends
            .iter()
            .map(|manager| {
                let manager = *manager;
                let handle = scope.spawn(move || search_single_backend(manager, query));
                (manager.identity().to_string(), handle)
            })
            .collect();

        // Join every task before proceeding; no early return on first result.
        handles
            .into_iter()
            .map(|(identity, handle)| {
                let outcome = handle.join().unwrap_or_else(|_| {
                    BackendOutcome::Failed("search task panicked".to_string())
                });
                (identity, outcome)
            })
            .collect()
    });

    let mut report = SearchReport::default();
    let mut merged = Vec::new();
    for (identity, outcome) in outcomes {
        match outcome {
            BackendOutcome::Found(packages) => merged.extend(packages),
            BackendOutcome::Failed(reason) => {
                output::verbose(&format!("{}: {}", identity, reason));
                report.failed.push(identity.clone());
            }
        }
        report.searched.push(identity);
    }

    rank(&mut merged);
    report.results = merged;
    Ok(report)
}

fn search_single_backend(manager: &dyn PackageManager, query: &str) -> BackendOutcome {
    match manager.search(query) {
        Ok(mut packages) => {
            let identity = manager.identity();
            let before = packages.len();
            packages.retain(|p| p.provider == identity);
            if packages.len() != before {
                output::verbose(&format!(
                    "{}: dropped {} result(s) attributed to another backend",
                    identity,
                    before - packages.len()
                ));
            }
            BackendOutcome::Found(packages)
        }
        Err(e) => BackendOutcome::Failed(e.to_string()),
    }
}

/// Sort by score, best first. Stable, so equal scores keep backend
/// registration order and then each backend's own order.
pub fn rank(packages: &mut [Package]) {
    packages.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
