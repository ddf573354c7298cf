//! Package name validation.
//!
//! Names are passed to backends as plain process arguments, never through a
//! shell, but they still must not be mistaken for flags or paths.

use crate::error::{PpmError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Allows: alphanumeric, dash, underscore, dot, plus, at sign, slash (scoped
/// npm packages), equals (pip version pins)
static SAFE_PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9@._+/=-]+$").expect("Invalid regex pattern"));

static SHELL_DANGEROUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[;`$(){}|&<>\\'"\n\r\t]"#).expect("Invalid regex pattern"));

const MAX_NAME_LEN: usize = 256;

pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PpmError::InvalidPackageName(
            "Package name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_NAME_LEN {
        let preview: String = name.chars().take(50).collect();
        return Err(PpmError::InvalidPackageName(format!(
            "Package name too long (max {} chars): {}...",
            MAX_NAME_LEN, preview
        )));
    }

    if name.starts_with('-') {
        return Err(PpmError::InvalidPackageName(format!(
            "Package name cannot start with '-': {}",
            name
        )));
    }

    if SHELL_DANGEROUS.is_match(name) {
        return Err(PpmError::InvalidPackageName(format!(
            "Package name contains unsafe characters: {}",
            name
        )));
    }

    if !SAFE_PACKAGE_NAME.is_match(name) {
        return Err(PpmError::InvalidPackageName(format!(
            "Package name contains invalid characters: {}",
            name
        )));
    }

    if name.contains("..") {
        return Err(PpmError::InvalidPackageName(format!(
            "Package name cannot contain path traversal: {}",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_package_names() {
        assert!(validate_package_name("left-pad").is_ok());
        assert!(validate_package_name("@angular/cli").is_ok());
        assert!(validate_package_name("python3.12").is_ok());
        assert!(validate_package_name("requests==2.32.0").is_ok());
        assert!(validate_package_name("extras/vlc").is_ok());
        assert!(validate_package_name("gcc++").is_ok());
    }

    #[test]
    fn test_shell_injection_blocked() {
        assert!(validate_package_name("foo; rm -rf /").is_err());
        assert!(validate_package_name("foo | cat").is_err());
        assert!(validate_package_name("foo$(cat)").is_err());
        assert!(validate_package_name("foo && echo").is_err());
    }

    #[test]
    fn test_flag_injection_blocked() {
        assert!(validate_package_name("--registry=http://evil").is_err());
        assert!(validate_package_name("-g").is_err());
    }

    #[test]
    fn test_path_traversal_blocked() {
        assert!(validate_package_name("../../../etc/passwd").is_err());
        assert!(validate_package_name("foo/../bar").is_err());
    }

    #[test]
    fn test_empty_and_long_names() {
        assert!(validate_package_name("").is_err());
        let long_name = "a".repeat(300);
        assert!(validate_package_name(&long_name).is_err());
    }
}
