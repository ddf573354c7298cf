//! pip package manager
//!
//! PyPI has no search API that pip still exposes, so a search resolves the
//! query as an exact project name.

use crate::error::{PpmError, Result};
use crate::packages::command::{BackendCommand, stdout_text};
use crate::packages::traits::{Package, PackageManager};
use crate::utils::sanitize;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;

const IDENTITY: &str = "pip";

/// Score given to an exact-name hit.
const EXACT_MATCH_SCORE: f64 = 0.8;

/// First line of `pip index versions`: `requests (2.32.3)`
static INDEX_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+\(([^)]+)\)").expect("Invalid regex pattern"));

pub struct PipManager {
    command: BackendCommand,
}

impl PipManager {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            command: BackendCommand::new("pip", timeout),
        }
    }

    fn outdated_packages(&self) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct Outdated {
            name: String,
        }

        let output = self.command.run_checked(
            &["list", "--outdated", "--format=json"],
            |diagnostic| PpmError::UpdateFailure {
                provider: IDENTITY.to_string(),
                diagnostic,
            },
        )?;
        let stdout = stdout_text(&output);
        if stdout.trim().is_empty() {
            return Ok(Vec::new());
        }
        let outdated: Vec<Outdated> = serde_json::from_str(&stdout)?;
        Ok(outdated.into_iter().map(|o| o.name).collect())
    }
}

/// Parse `pip index versions` output into a package named by `query`.
pub(crate) fn parse_index_output(query: &str, stdout: &str) -> Package {
    let mut pkg = exact_match(query);
    if let Some(caps) = stdout.lines().find_map(|line| INDEX_HEADER.captures(line.trim())) {
        pkg.version = caps[2].trim().to_string();
    }
    pkg
}

/// Parse `pip show` `Key: value` lines into a package named by `query`.
pub(crate) fn parse_show_output(query: &str, stdout: &str) -> Package {
    let mut pkg = exact_match(query);
    for line in stdout.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_lowercase().as_str() {
            "version" => pkg.version = value.to_string(),
            "summary" => pkg.description = value.to_string(),
            "author" => pkg.author = value.to_string(),
            "home-page" if !value.is_empty() => pkg.homepage = Some(value.to_string()),
            _ => {}
        }
    }
    pkg
}

fn exact_match(query: &str) -> Package {
    Package {
        name: query.to_string(),
        provider: IDENTITY.to_string(),
        score: EXACT_MATCH_SCORE,
        ..Default::default()
    }
}

impl PackageManager for PipManager {
    fn identity(&self) -> &str {
        IDENTITY
    }

    fn is_available(&self) -> bool {
        self.command.probe()
    }

    fn search(&self, query: &str) -> Result<Vec<Package>> {
        let search_failure = |reason: String| PpmError::SearchFailure {
            provider: IDENTITY.to_string(),
            reason,
        };

        if let Ok(output) = self
            .command
            .run_checked(&["index", "versions", query], search_failure)
        {
            return Ok(vec![parse_index_output(query, &stdout_text(&output))]);
        }

        // `pip index` is missing on old pips and fails for unknown names;
        // `pip show` still finds locally installed projects.
        let output = self
            .command
            .run_checked(&["show", query], search_failure)?;
        Ok(vec![parse_show_output(query, &stdout_text(&output))])
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
        let targets = if name.is_empty() {
            self.outdated_packages()?
        } else {
            sanitize::validate_package_name(name)?;
            vec![name.to_string()]
        };

        if targets.is_empty() {
            crate::ui::verbose("pip: nothing to update");
            return Ok(());
        }

        let mut args = vec!["install", "--upgrade"];
        args.extend(targets.iter().map(String::as_str));
        self.command.run_checked(&args, |diagnostic| PpmError::UpdateFailure {
            provider: IDENTITY.to_string(),
            diagnostic,
        })?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        sanitize::validate_package_name(name)?;
        self.command
            .run_checked(&["uninstall", "-y", name], |diagnostic| {
                PpmError::RemoveFailure {
                    provider: IDENTITY.to_string(),
                    diagnostic,
                }
            })?;
        Ok(())
    }
}
