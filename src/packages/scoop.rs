//! scoop package manager
//!
//! Windows command-line installer working from git "buckets".

use crate::error::{PpmError, Result};
use crate::packages::command::{BackendCommand, stdout_text};
use crate::packages::traits::{Package, PackageManager};
use crate::utils::sanitize;
use std::time::Duration;

const IDENTITY: &str = "scoop";

/// Default relevance for bucket matches; scoop does not rank.
const BUCKET_MATCH_SCORE: f64 = 0.7;

pub struct ScoopManager {
    command: BackendCommand,
}

impl ScoopManager {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            command: BackendCommand::new("scoop", timeout),
        }
    }

    /// Fill version and homepage from `scoop info`. `None` when the lookup
    /// fails, which drops the entry.
    fn enrich(&self, mut pkg: Package) -> Option<Package> {
        let output = self.command.run(&["info", &pkg.name]).ok()?;
        if !output.status.success() {
            return None;
        }
        let (version, homepage) = parse_info_output(&stdout_text(&output));
        if let Some(version) = version {
            pkg.version = version;
        }
        if homepage.is_some() {
            pkg.homepage = homepage;
        }
        Some(pkg)
    }
}

/// Parse `scoop search` output.
///
/// Current scoop prints a table:
///
/// ```text
/// Name     Version Source Binaries
/// ----     ------- ------ --------
/// left-pad 1.0.0   main
/// ```
///
/// Older releases print `name (bucket): description` lines.
pub(crate) fn parse_search_output(stdout: &str) -> Vec<Package> {
    let mut results = Vec::new();
    let mut in_table = false;

    for line in stdout.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("Results from") {
            continue;
        }

        let columns: Vec<&str> = trimmed.split_whitespace().collect();
        if columns.first() == Some(&"Name") && columns.get(1) == Some(&"Version") {
            in_table = true;
            continue;
        }
        if in_table {
            if trimmed.starts_with('-') {
                continue;
            }
            results.push(Package {
                name: columns[0].to_string(),
                version: columns.get(1).unwrap_or(&"").to_string(),
                provider: IDENTITY.to_string(),
                score: BUCKET_MATCH_SCORE,
                ..Default::default()
            });
            continue;
        }

        if trimmed.ends_with("bucket:") {
            continue;
        }
        let Some((name_part, description)) = trimmed.split_once(':') else {
            // `git (2.40.0)` entries listed under a bucket heading
            if let Some((name, rest)) = trimmed.split_once(" (")
                && let Some(version) = rest.strip_suffix(')')
            {
                results.push(Package {
                    name: name.trim().to_string(),
                    version: version.trim().to_string(),
                    provider: IDENTITY.to_string(),
                    score: BUCKET_MATCH_SCORE,
                    ..Default::default()
                });
            }
            continue;
        };
        let name = match name_part.split_once(" (") {
            Some((name, _bucket)) => name,
            None => name_part,
        }
        .trim();
        if name.is_empty() {
            continue;
        }
        results.push(Package {
            name: name.to_string(),
            description: description.trim().to_string(),
            provider: IDENTITY.to_string(),
            score: BUCKET_MATCH_SCORE,
            ..Default::default()
        });
    }

    results
}

/// Extract `Version:` and `Website:` from `scoop info` output.
pub(crate) fn parse_info_output(stdout: &str) -> (Option<String>, Option<String>) {
    let mut version = None;
    let mut homepage = None;
    for line in stdout.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Version") {
            if let Some(value) = rest.trim_start().strip_prefix(':') {
                version = Some(value.trim().to_string());
            }
        } else if let Some(rest) = line.strip_prefix("Website")
            && let Some(value) = rest.trim_start().strip_prefix(':')
        {
            homepage = Some(value.trim().to_string());
        }
    }
    (version, homepage)
}

impl PackageManager for ScoopManager {
    fn identity(&self) -> &str {
        IDENTITY
    }

    fn is_available(&self) -> bool {
        self.command.probe()
    }

    fn search(&self, query: &str) -> Result<Vec<Package>> {
        let output = self
            .command
            .run_checked(&["search", query], |reason| PpmError::SearchFailure {
                provider: IDENTITY.to_string(),
                reason,
            })?;

        Ok(parse_search_output(&stdout_text(&output))
            .into_iter()
            .filter_map(|pkg| {
                if pkg.version.is_empty() {
                    self.enrich(pkg)
                } else {
                    Some(pkg)
                }
            })
            .collect())
    }

    fn install(&self, name: &str) -> Result<()> {
        sanitize::validate_package_name(name)?;
        self.command
            .run_checked(&["install", name], |diagnostic| PpmError::InstallFailure {
                provider: IDENTITY.to_string(),
                diagnostic,
            })?;
        Ok(())
    }

    fn update(&self, name: &str) -> Result<()> {
        let target = if name.is_empty() {
            "*"
        } else {
            sanitize::validate_package_name(name)?;
            name
        };
        self.command
            .run_checked(&["update", target], |diagnostic| PpmError::UpdateFailure {
                provider: IDENTITY.to_string(),
                diagnostic,
            })?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        sanitize::validate_package_name(name)?;
        self.command
            .run_checked(&["uninstall", name], |diagnostic| PpmError::RemoveFailure {
                provider: IDENTITY.to_string(),
                diagnostic,
            })?;
        Ok(())
    }
}
