use crate::error::Result;
use serde::Serialize;

/// A package as reported by one backend's search.
///
/// Values are produced by [`PackageManager::search`] and never modified
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    /// Identity of the backend that produced this result.
    pub provider: String,
    /// Relevance in `[0, 1]`, assigned by the backend.
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

/// Clamp a backend-assigned score into `[0, 1]`. NaN counts as no relevance
/// and `-0.0` becomes `0.0`.
pub fn normalize_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0) + 0.0
    }
}

/// Contract every backend adapter satisfies.
///
/// Calls are self-contained and may block on an external process for an
/// unbounded amount of time.
pub trait PackageManager: Send + Sync {
    /// Stable short name, e.g. `npm`. Join key with [`Package::provider`].
    fn identity(&self) -> &str;

    /// Cheap presence probe. Never fails; returns `false` when in doubt.
    fn is_available(&self) -> bool;

    /// Search the backend's index. Must not change system state.
    fn search(&self, query: &str) -> Result<Vec<Package>>;

    fn install(&self, name: &str) -> Result<()>;

    /// Update one package, or everything this backend manages when `name`
    /// is empty.
    fn update(&self, name: &str) -> Result<()>;

    fn remove(&self, name: &str) -> Result<()>;
}
