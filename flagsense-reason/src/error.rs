//! Error types for evaluation failures and the reason codec.

use flagsense_log::warn;
use thiserror::Error;

/// Abnormal evaluation failure.
///
/// Raised when evaluation cannot produce any [`EvaluationReason`] at all.
/// An evaluation that finishes with an explanation of what went wrong
/// returns `EvaluationReason::Error` instead.
///
/// [`EvaluationReason`]: crate::EvaluationReason
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvaluationError {
    message: String,
}

impl EvaluationError {
    /// Create an evaluation error with a diagnostic message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Create an evaluation error and log it at warn level.
    pub fn logged(message: impl Into<String>) -> Self {
        let err = Self::new(message);
        warn!(target: "flagsense::evaluation", "Evaluation failed: {}", err.message);
        err
    }

    /// Diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of an evaluation that may fail abnormally.
pub type EvaluationResult<T> = std::result::Result<T, EvaluationError>;

/// Errors at the reason serialization boundary.
#[derive(Debug, Error)]
pub enum ReasonError {
    /// Serialization error.
    #[error("Reason serialization error: {0}")]
    Encode(String),

    /// Input was not a valid reason (unknown kind, missing or mistyped field).
    #[error("Reason deserialization error: {0}")]
    Decode(String),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, ReasonError>;
