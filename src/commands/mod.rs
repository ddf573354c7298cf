pub mod backends;
pub mod completions;
pub mod install;
pub mod remove;
pub mod search;
pub mod update;
