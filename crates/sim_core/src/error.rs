//! Error types for seeded simulation.
//!
//! This module provides:
//! - `SimError`: The error taxonomy shared by draw sources and estimators
//! - `Result`: Crate-wide result alias

use thiserror::Error;

/// Result alias used throughout the simulation crates.
pub type Result<T> = std::result::Result<T, SimError>;

/// Simulation errors.
///
/// # Variants
/// - `InvalidParameter`: A distribution or estimator parameter is out of domain
/// - `UndefinedResult`: An aggregate has no defined value (zero trials, zero events)
/// - `Export`: A convergence trace could not be written
///
/// The stopping-time draw cap is deliberately absent: hitting it yields a
/// capped trial result rather than an error.
///
/// # Examples
/// ```
/// use sim_core::SimError;
///
/// let err = SimError::invalid_parameter("std_dev", "must be non-negative, got -1");
/// assert!(err.to_string().contains("std_dev"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    /// Parameter outside its valid domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// Aggregation has no defined value.
    #[error("Undefined result: {reason}")]
    UndefinedResult {
        /// What made the result undefined.
        reason: String,
    },

    /// Trace export failure.
    #[error("Export error: {0}")]
    Export(String),
}

impl SimError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create an undefined result error.
    pub fn undefined(reason: impl Into<String>) -> Self {
        Self::UndefinedResult {
            reason: reason.into(),
        }
    }

    /// Returns true for `UndefinedResult`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::UndefinedResult { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = SimError::invalid_parameter("rate", "must be positive, got 0");
        let msg = err.to_string();
        assert!(msg.contains("'rate'"));
        assert!(msg.contains("must be positive"));
        assert!(!err.is_undefined());
    }

    #[test]
    fn test_undefined_display() {
        let err = SimError::undefined("zero trials requested");
        assert!(err.to_string().starts_with("Undefined result"));
        assert!(err.is_undefined());
    }

    #[test]
    fn test_export_display() {
        let err = SimError::Export("disk full".to_string());
        assert_eq!(err.to_string(), "Export error: disk full");
    }
}
