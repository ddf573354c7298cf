//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const DISPLAY_NAME: &str = "PPM";
pub const BINARY_NAME: &str = "ppm";
pub const ENV_PREFIX: &str = "PPM";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn cli_with(args: &str) -> String {
    format!("{} {}", BINARY_NAME, args)
}
