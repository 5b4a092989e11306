//! Error types for the textfold library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TextfoldError`] enum. Configuration problems are reported before any
//! training happens; data-contract violations (such as a confusion matrix
//! receiving a label it was not built for) are returned as errors and are
//! expected to be propagated, never recovered.
//!
//! # Examples
//!
//! ```
//! use textfold::error::{Result, TextfoldError};
//!
//! fn check_folds(folds: usize) -> Result<()> {
//!     if folds < 2 {
//!         return Err(TextfoldError::invalid_config("at least two folds are required"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_folds(1).is_err());
//! assert!(check_folds(5).is_ok());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for textfold operations.
#[derive(Error, Debug)]
pub enum TextfoldError {
    /// I/O errors (reading datasets or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Classifier construction errors
    #[error("Classification error: {0}")]
    Classification(String),

    /// Evaluation errors (folds, confusion matrices)
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Dataset loading errors
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// A label outside the configured class list was handed to a confusion matrix.
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors carrying context from loaders
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TextfoldError.
pub type Result<T> = std::result::Result<T, TextfoldError>;

impl TextfoldError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TextfoldError::Analysis(msg.into())
    }

    /// Create a new classification error.
    pub fn classification<S: Into<String>>(msg: S) -> Self {
        TextfoldError::Classification(msg.into())
    }

    /// Create a new evaluation error.
    pub fn evaluation<S: Into<String>>(msg: S) -> Self {
        TextfoldError::Evaluation(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        TextfoldError::Dataset(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TextfoldError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        TextfoldError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TextfoldError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TextfoldError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = TextfoldError::invalid_config("folds must be at least 2");
        assert_eq!(
            error.to_string(),
            "Error: Invalid configuration: folds must be at least 2"
        );

        let error = TextfoldError::UnknownLabel("neutral".to_string());
        assert_eq!(error.to_string(), "Unknown label: neutral");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TextfoldError::from(io_error);

        match error {
            TextfoldError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
