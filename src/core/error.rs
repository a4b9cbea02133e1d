//! Error handling and error types for streamtune.
//!
//! This module provides the crate-wide error taxonomy using Rust's Result
//! type system. The taxonomy distinguishes caller-facing contract violations
//! (schema mismatches, unknown categorical codes, incomplete control
//! configuration), which abort an objective call, from per-row evaluation
//! failures, which are absorbed by the batch driver's NaN fallback.

use thiserror::Error;

/// Main error type for the streamtune library.
#[derive(Error, Debug)]
pub enum TuneError {
    /// Hyperparameter row/matrix width does not match the family schema.
    #[error("schema mismatch for {family}: expected {expected} columns, got {actual}")]
    SchemaMismatch {
        /// Model family whose schema was violated
        family: &'static str,
        /// Required column count
        expected: usize,
        /// Column count actually supplied
        actual: usize,
    },

    /// A selector received an integer code outside its documented domain.
    #[error("unknown code {code} for selector {selector} (valid codes: {domain})")]
    UnknownCode {
        /// Name of the selector that rejected the code
        selector: &'static str,
        /// The offending code
        code: i64,
        /// Human-readable description of the valid domain
        domain: &'static str,
    },

    /// Control configuration errors (missing or inconsistent entries).
    #[error("control configuration error: {message}")]
    Control {
        /// Description of the defect
        message: String,
    },

    /// Dataset-related errors.
    #[error("dataset error: {message}")]
    Dataset {
        /// Description of the defect
        message: String,
    },

    /// Invalid input parameters.
    #[error("invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Offending value rendered as text
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Learner-internal failure raised by the progressive evaluator while
    /// training or scoring one row's model.
    #[error("evaluation failed: {source}")]
    Evaluation {
        /// The underlying evaluator/learner failure
        #[from]
        source: anyhow::Error,
    },

    /// JSON serialization errors.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serde_json failure
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using TuneError.
pub type Result<T> = std::result::Result<T, TuneError>;

impl TuneError {
    /// Create a control configuration error.
    pub fn control<S: Into<String>>(message: S) -> Self {
        TuneError::Control {
            message: message.into(),
        }
    }

    /// Create a dataset error.
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        TuneError::Dataset {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        TuneError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an evaluation error from a plain message.
    pub fn evaluation<S: Into<String>>(message: S) -> Self {
        TuneError::Evaluation {
            source: anyhow::anyhow!(message.into()),
        }
    }

    /// Check if this error is recoverable by the per-row fallback policy.
    ///
    /// Only evaluation failures are recoverable: they degrade the failing
    /// row's objective value to NaN. Every other variant signals a caller
    /// contract defect and aborts the whole objective call.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TuneError::Evaluation { .. })
    }

    /// Get error category for logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            TuneError::SchemaMismatch { .. } => "schema_mismatch",
            TuneError::UnknownCode { .. } => "unknown_code",
            TuneError::Control { .. } => "control",
            TuneError::Dataset { .. } => "dataset",
            TuneError::InvalidParameter { .. } => "invalid_parameter",
            TuneError::Evaluation { .. } => "evaluation",
            TuneError::Json { .. } => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TuneError::control("missing horizon");
        assert_eq!(err.category(), "control");
        assert!(!err.is_recoverable());

        let err = TuneError::evaluation("learner blew up");
        assert_eq!(err.category(), "evaluation");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_schema_mismatch_display() {
        let err = TuneError::SchemaMismatch {
            family: "snarimax",
            expected: 12,
            actual: 11,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("snarimax"));
        assert!(msg.contains("12"));
        assert!(msg.contains("11"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_unknown_code_display() {
        let err = TuneError::UnknownCode {
            selector: "leaf_prediction",
            code: 7,
            domain: "0..=2",
        };
        assert_eq!(err.category(), "unknown_code");
        assert!(format!("{}", err).contains("leaf_prediction"));
    }

    #[test]
    fn test_anyhow_conversion() {
        let inner = anyhow::anyhow!("out of memory in leaf model");
        let err: TuneError = inner.into();
        assert!(matches!(err, TuneError::Evaluation { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_parameter_errors() {
        let err = TuneError::invalid_parameter("delta", "-0.5", "must be in (0, 1)");
        assert_eq!(err.category(), "invalid_parameter");
        assert!(!err.is_recoverable());
    }
}
