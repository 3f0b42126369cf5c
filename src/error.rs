//! Error types for Afinar operations.
//!
//! Provides rich error context for library consumers. Any error raised while
//! scoring a candidate aborts the search run; none is converted into a
//! fitness value.

use thiserror::Error;

/// Main error type for Afinar operations.
///
/// # Examples
///
/// ```
/// use afinar::error::AfinarError;
///
/// let err = AfinarError::configuration("{n_neighbors=0}", "k must be at least 1");
/// assert!(err.to_string().contains("n_neighbors=0"));
/// ```
#[derive(Debug, Error)]
pub enum AfinarError {
    /// Candidate genes cannot be used to construct or fit a model.
    #[error("configuration error for genes {genes}: {reason}")]
    Configuration {
        /// Rendered genes of the offending candidate
        genes: String,
        /// What went wrong while building or fitting the model
        reason: String,
    },

    /// Training or validation data is missing or malformed.
    #[error("data unavailable: {reason}")]
    DataUnavailable {
        /// Description of the missing or malformed data
        reason: String,
    },

    /// Invalid search constant provided.
    #[error("invalid hyperparameter {param}={value} (expected {constraint})")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A parameter name that the space does not declare.
    #[error("unknown parameter: {name}")]
    UnknownParameter {
        /// The requested name
        name: String,
    },

    /// The parameter space cannot be searched.
    #[error("invalid parameter space: {reason}")]
    InvalidSpace {
        /// Why the space was rejected
        reason: String,
    },

    /// An evaluator produced a score outside [0, 1].
    #[error("fitness {score} for genes {genes} is outside [0, 1]")]
    InvalidFitness {
        /// Rendered genes of the candidate
        genes: String,
        /// The offending score
        score: f64,
    },

    /// Matrix/vector dimensions don't match for the operation.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Malformed input text.
    #[error("parse error at line {line}: {cause}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Description of the problem
        cause: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AfinarError {
    /// Create a configuration error for the given genes.
    #[must_use]
    pub fn configuration(genes: impl ToString, reason: impl Into<String>) -> Self {
        Self::Configuration {
            genes: genes.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a data-unavailable error.
    #[must_use]
    pub fn data_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            reason: reason.into(),
        }
    }

    /// Create an invalid-hyperparameter error.
    #[must_use]
    pub fn invalid_hyperparameter(
        param: &str,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Create an invalid-space error.
    #[must_use]
    pub fn invalid_space(reason: impl Into<String>) -> Self {
        Self::InvalidSpace {
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error for a named quantity.
    #[must_use]
    pub fn dimension_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{what}={expected}"),
            actual: format!("{what}={actual}"),
        }
    }
}

impl From<serde_json::Error> for AfinarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with `AfinarError`.
pub type Result<T> = std::result::Result<T, AfinarError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
