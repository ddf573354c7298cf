//! Runtime settings for one invocation.
//!
//! ppm keeps no config file; everything comes from global CLI flags, with
//! `PPM_*` environment variables as fallbacks (wired up by clap).

use crate::cli::args::GlobalFlags;
use crate::error::{PpmError, Result};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Upper bound on each backend subprocess. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Backends to register, in priority order. `None` registers all.
    pub backends: Option<Vec<String>>,
    pub assume_yes: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl Settings {
    pub fn from_flags(flags: &GlobalFlags) -> Result<Self> {
        let timeout = match flags.timeout {
            Some(0) => {
                return Err(PpmError::ConfigError(format!(
                    "--timeout ({}) must be at least 1 second",
                    crate::project_identity::env_key("TIMEOUT")
                )));
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Self {
            timeout,
            backends: parse_backend_list(flags.backends.as_deref())?,
            assume_yes: flags.yes,
            verbose: flags.verbose,
            quiet: flags.quiet,
        })
    }
}

/// Parse a comma separated backend list such as `pip,npm`.
fn parse_backend_list(raw: Option<&str>) -> Result<Option<Vec<String>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let names: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if names.is_empty() {
        return Err(PpmError::ConfigError(format!(
            "--backends ({}) must name at least one backend",
            crate::project_identity::env_key("BACKENDS")
        )));
    }

    Ok(Some(names))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            verbose: false,
            quiet: false,
            yes: false,
            no_color: false,
            timeout: None,
            backends: None,
        }
    }

    #[test]
    fn defaults_have_no_timeout_and_all_backends() {
        let settings = Settings::from_flags(&flags()).expect("settings");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn timeout_is_converted_to_duration() {
        let settings = Settings::from_flags(&GlobalFlags {
            timeout: Some(90),
            ..flags()
        })
        .expect("settings");
        assert_eq!(settings.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Settings::from_flags(&GlobalFlags {
            timeout: Some(0),
            ..flags()
        })
        .expect_err("zero timeout");
        assert!(err.to_string().contains("PPM_TIMEOUT"));
    }

    #[test]
    fn backend_list_is_trimmed_and_lowercased() {
        let parsed = parse_backend_list(Some(" PIP, npm ,,")).expect("parse");
        assert_eq!(parsed, Some(vec!["pip".to_string(), "npm".to_string()]));
    }

    #[test]
    fn empty_backend_list_is_rejected() {
        assert!(parse_backend_list(Some(" , ")).is_err());
    }
}
