//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Simulation error from the core or engine layers
    #[error(transparent)]
    Simulation(#[from] sim_core::SimError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::SimError;

    #[test]
    fn test_simulation_error_is_transparent() {
        let err: CliError = SimError::invalid_parameter("cap", "must be at least 1").into();
        assert_eq!(err.to_string(), "Invalid parameter 'cap': must be at least 1");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigError::Validation(vec!["trials too large".into()]).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("trials too large"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = CliError::invalid_argument("normal takes 2 parameters");
        assert_eq!(err.to_string(), "Invalid argument: normal takes 2 parameters");
    }
}
