//! Error types for swarmlab
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Top-level error type for optimizer construction and parameter lookups
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwarmError {
    /// Invalid configuration detected at construction time
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// An adaptive parameter was queried without being registered
    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    /// Dimension mismatch between two solutions
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Invalid solution structure (e.g. a vector that is not a permutation)
    #[error("Invalid solution structure: {0}")]
    InvalidStructure(String),

    /// History or parameter (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SwarmError {
    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<serde_json::Error> for SwarmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for swarm operations
pub type SwarmResult<T> = Result<T, SwarmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = SwarmError::config("population size must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: population size must be positive"
        );
    }

    #[test]
    fn test_parameter_not_found_display() {
        let err = SwarmError::ParameterNotFound("loudness".to_string());
        assert_eq!(err.to_string(), "Parameter not found: loudness");
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = SwarmError::DimensionMismatch {
            expected: 10,
            actual: 5,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 10, got 5");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let err: SwarmError = json_err.into();
        assert!(matches!(err, SwarmError::Serialization(_)));
    }
}
