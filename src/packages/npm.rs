//! npm package manager
//!
//! Installs and manages Node.js packages globally using npm.

use crate::error::{PpmError, Result};
use crate::packages::command::{BackendCommand, stdout_text};
use crate::packages::traits::{Package, PackageManager, normalize_score};
use crate::utils::sanitize;
use serde::Deserialize;
use std::time::Duration;

const IDENTITY: &str = "npm";

pub struct NpmManager {
    command: BackendCommand,
}

impl NpmManager {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            command: BackendCommand::new("npm", timeout),
        }
    }
}

/// `npm search --json` has emitted two shapes over the years: the registry
/// envelope with per-object scores, and a flat array of packages.
#[derive(Deserialize)]
#[serde(untagged)]
enum NpmSearchOutput {
    Envelope { objects: Vec<NpmSearchObject> },
    Flat(Vec<NpmPackage>),
}

#[derive(Deserialize)]
struct NpmSearchObject {
    package: NpmPackage,
    #[serde(default)]
    score: Option<NpmScore>,
}

#[derive(Deserialize)]
struct NpmPackage {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<serde_json::Value>,
    #[serde(default)]
    links: NpmLinks,
    #[serde(default)]
    score: Option<NpmScore>,
}

#[derive(Deserialize, Default)]
struct NpmLinks {
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    repository: Option<String>,
}

#[derive(Deserialize)]
struct NpmScore {
    #[serde(rename = "final")]
    final_score: f64,
}

/// Author is usually `{"name": ..}` but older packages carry a plain string.
fn author_name(author: Option<&serde_json::Value>) -> String {
    match author {
        Some(serde_json::Value::String(name)) => name.clone(),
        Some(serde_json::Value::Object(map)) => map
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

pub(crate) fn parse_search_output(stdout: &str) -> Result<Vec<Package>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parsed: NpmSearchOutput =
        serde_json::from_str(stdout).map_err(|e| PpmError::SearchFailure {
            provider: IDENTITY.to_string(),
            reason: format!("failed to parse npm search results: {}", e),
        })?;

    let entries: Vec<(NpmPackage, Option<f64>)> = match parsed {
        NpmSearchOutput::Envelope { objects } => objects
            .into_iter()
            .map(|obj| {
                let score = obj
                    .score
                    .as_ref()
                    .or(obj.package.score.as_ref())
                    .map(|s| s.final_score);
                (obj.package, score)
            })
            .collect(),
        NpmSearchOutput::Flat(packages) => packages
            .into_iter()
            .map(|pkg| {
                let score = pkg.score.as_ref().map(|s| s.final_score);
                (pkg, score)
            })
            .collect(),
    };

    let total = entries.len();
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(idx, (pkg, score))| {
            // npm lists best matches first; use the position when no score is given
            let score = score.unwrap_or(1.0 - idx as f64 / total as f64);
            Package {
                author: author_name(pkg.author.as_ref()),
                name: pkg.name,
                version: pkg.version.unwrap_or_default(),
                description: pkg.description.unwrap_or_default(),
                provider: IDENTITY.to_string(),
                score: normalize_score(score),
                downloads: None,
                homepage: pkg.links.homepage,
                repository: pkg.links.repository,
            }
        })
        .collect())
}

impl PackageManager for NpmManager {
    fn identity(&self) -> &str {
        IDENTITY
    }

    fn is_available(&self) -> bool {
        self.command.probe()
    }

    fn search(&self, query: &str) -> Result<Vec<Package>> {
        let output = self
            .command
            .run_checked(&["search", "--json", query], |reason| {
                PpmError::SearchFailure {
                    provider: IDENTITY.to_string(),
                    reason,
                }
            })?;
        parse_search_output(&stdout_text(&output))
    }

    fn install(&self, name: &str) -> Result<()> {
        sanitize::validate_package_name(name)?;
        self.command
            .run_checked(&["install", "-g", name], |diagnostic| {
                PpmError::InstallFailure {
                    provider: IDENTITY.to_string(),
                    diagnostic,
                }
            })?;
        Ok(())
    }

    fn update(&self, name: &str) -> Result<()> {
        let mut args = vec!["update", "-g"];
        if !name.is_empty() {
            sanitize::validate_package_name(name)?;
            args.push(name);
        }
        self.command.run_checked(&args, |diagnostic| PpmError::UpdateFailure {
            provider: IDENTITY.to_string(),
            diagnostic,
        })?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        sanitize::validate_package_name(name)?;
        self.command
            .run_checked(&["uninstall", "-g", name], |diagnostic| {
                PpmError::RemoveFailure {
                    provider: IDENTITY.to_string(),
                    diagnostic,
                }
            })?;
        Ok(())
    }
}
