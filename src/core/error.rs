//! Error handling and error types for the regression objectives.
//!
//! Errors only arise at the edges: configuration parsing and validation,
//! metadata construction, and structural misuse of an objective (calling it
//! before `init`, or with buffers of the wrong length). The derivative math
//! itself never fails.

use std::io;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum LightGBMError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Dataset and metadata errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Objective used before `init` bound its metadata
    #[error("Objective '{objective}' is not initialized, call init() first")]
    NotInitialized { objective: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },
}

/// Type alias for Results using LightGBMError
pub type Result<T> = std::result::Result<T, LightGBMError>;

impl LightGBMError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        LightGBMError::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        LightGBMError::Dataset {
            message: message.into(),
        }
    }

    /// Create an error for an objective name outside the registry
    pub fn unknown_objective<S: AsRef<str>>(name: S) -> Self {
        LightGBMError::Config {
            message: format!(
                "Unknown objective '{}', expected one of: regression, regression_l1, huber, fair",
                name.as_ref()
            ),
        }
    }

    /// Create a not-initialized error for the named objective
    pub fn not_initialized<S: Into<String>>(objective: S) -> Self {
        LightGBMError::NotInitialized {
            objective: objective.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        LightGBMError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        LightGBMError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            LightGBMError::Config { .. } => false,
            LightGBMError::Dataset { .. } => false,
            LightGBMError::NotInitialized { .. } => true,
            LightGBMError::IO { .. } => false,
            LightGBMError::Json { .. } => false,
            LightGBMError::InvalidParameter { .. } => false,
            LightGBMError::DimensionMismatch { .. } => false,
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            LightGBMError::Config { .. } => "config",
            LightGBMError::Dataset { .. } => "dataset",
            LightGBMError::NotInitialized { .. } => "not_initialized",
            LightGBMError::IO { .. } => "io",
            LightGBMError::Json { .. } => "json",
            LightGBMError::InvalidParameter { .. } => "invalid_parameter",
            LightGBMError::DimensionMismatch { .. } => "dimension_mismatch",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::LightGBMError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::LightGBMError::config(format!($fmt, $($arg)*))
    };
}

/// Create a dataset error, optionally with `format!` arguments
#[macro_export]
macro_rules! dataset_error {
    ($msg:expr) => {
        $crate::core::error::LightGBMError::dataset($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::LightGBMError::dataset(format!($fmt, $($arg)*))
    };
}
