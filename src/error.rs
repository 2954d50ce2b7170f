//! Error types for the crate.

use thiserror::Error;

use crate::streaming::SkipReason;

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, CourseworkError>;

#[derive(Error, Debug)]
pub enum CourseworkError {
    /// Two inputs that must line up do not.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
    /// A matrix that needs inverting has no inverse.
    #[error("Matrix is singular or nearly singular")]
    SingularMatrix,
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Model not fitted. Call fit() first.")]
    ModelNotFitted,
    /// A line rejected while running in strict mode.
    #[error("line {line_no}: {reason}")]
    Line { line_no: usize, reason: SkipReason },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CourseworkError {
    pub(crate) fn length_mismatch(expected: usize, actual: usize) -> Self {
        CourseworkError::ShapeMismatch {
            expected: format!("length {}", expected),
            actual: format!("length {}", actual),
        }
    }
}
