//! `ppm backends`: registered package managers and their availability.

use crate::error::Result;
use crate::packages::{BackendRegistry, PackageManager};
use crate::ui as output;
use colored::Colorize;
use rayon::prelude::*;

pub struct BackendStatus {
    pub identity: String,
    pub available: bool,
}

/// Probe every registered backend. Probes run in parallel; the result keeps
/// registration (priority) order.
pub fn probe_all(registry: &BackendRegistry) -> Vec<BackendStatus> {
    let managers: Vec<&dyn PackageManager> = registry.iter().collect();
    managers
        .par_iter()
        .map(|manager| BackendStatus {
            identity: manager.identity().to_string(),
            available: manager.is_available(),
        })
        .collect()
}

pub fn run(registry: &BackendRegistry) -> Result<()> {
    output::header("Package managers (priority order)");

    let statuses = probe_all(registry);
    for (idx, status) in statuses.iter().enumerate() {
        let state = if status.available {
            "available".green().to_string()
        } else {
            "not found".red().to_string()
        };
        output::keyval(&format!("{}. {}", idx + 1, status.identity), &state);
    }

    let usable = statuses.iter().filter(|s| s.available).count();
    if usable == 0 {
        output::warning("No package manager is available on this system");
    } else {
        output::info(&format!("{} of {} available", usable, statuses.len()));
    }
    Ok(())
}
