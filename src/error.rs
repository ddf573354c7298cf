use thiserror::Error;

#[derive(Error, Debug)]
pub enum PpmError {
    /// A single backend's search failed. Absorbed by the search orchestrator.
    #[error("{provider} search failed: {reason}")]
    SearchFailure { provider: String, reason: String },

    #[error("{provider} install failed:\n{diagnostic}")]
    InstallFailure {
        provider: String,
        diagnostic: String,
    },

    #[error("{provider} update failed:\n{diagnostic}")]
    UpdateFailure {
        provider: String,
        diagnostic: String,
    },

    #[error("{provider} uninstall failed:\n{diagnostic}")]
    RemoveFailure {
        provider: String,
        diagnostic: String,
    },

    #[error("No available package manager found")]
    NoProviderAvailable,

    /// Every available backend was tried; only the last error is kept.
    #[error("No package manager could install {package}: {last}")]
    AggregateInstallFailure {
        package: String,
        #[source]
        last: Box<PpmError>,
    },

    #[error("No package manager could {operation} {target}: {last}")]
    AggregateOperationFailure {
        operation: String,
        target: String,
        #[source]
        last: Box<PpmError>,
    },

    #[error("Package manager '{0}' is not registered or not available")]
    ProviderNotFound(String),

    #[error("Invalid selection: '{0}'")]
    InvalidSelection(String),

    #[error("Search query cannot be empty")]
    EmptyQuery,

    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PpmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_install_failure_carries_backend_diagnostic() {
        let err = PpmError::AggregateInstallFailure {
            package: "left-pad".to_string(),
            last: Box::new(PpmError::InstallFailure {
                provider: "pip".to_string(),
                diagnostic: "ERROR: No matching distribution found".to_string(),
            }),
        };

        let text = err.to_string();
        assert!(text.contains("left-pad"));
        assert!(text.contains("No matching distribution found"));
    }

    #[test]
    fn provider_not_found_names_identity() {
        let err = PpmError::ProviderNotFound("brew".to_string());
        assert!(err.to_string().contains("'brew'"));
    }
}
