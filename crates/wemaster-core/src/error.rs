//! # Error Types
//!
//! Errors raised while constructing foundational values. All use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//! Lifecycle errors live with the lifecycle in `wemaster-lesson`.

use thiserror::Error;

/// Top-level error type for foundational values.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A timestamp string could not be parsed or was not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A timestamp computation left the representable range.
    #[error("timestamp out of range: {0}")]
    OutOfRange(String),

    /// An identifier failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Identifier validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is not a well-formed lesson identifier.
    #[error("invalid lesson id {value:?}: {reason}")]
    InvalidLessonId {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
