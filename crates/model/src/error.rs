//! Error types for the lazytodo-model crate.
//!
//! This module defines the errors that can occur when building domain values
//! from user input or persisted data.

use thiserror::Error;

/// Errors that can occur while constructing domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Deadline text did not match `YYYY-MM-DD HH:MM` or named an impossible time.
    #[error("invalid deadline {input:?}: {reason}")]
    InvalidDeadline {
        /// The text that failed to parse.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A stored priority value was outside `0..=3`.
    #[error("invalid priority value: {0}")]
    InvalidPriority(i64),
}

/// A specialized Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ModelError::InvalidDeadline {
            input: "tomorrow".to_string(),
            reason: "expected YYYY-MM-DD HH:MM".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid deadline \"tomorrow\": expected YYYY-MM-DD HH:MM"
        );

        assert_eq!(
            ModelError::InvalidPriority(7).to_string(),
            "invalid priority value: 7"
        );
    }
}
