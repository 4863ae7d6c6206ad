//! Error types for key generation and key parsing.

use thiserror::Error;

/// Errors that can occur while generating or parsing keys.
#[derive(Debug, Error)]
pub enum KeyGenError {
    /// Writing a key string failed.
    #[error("Key formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    /// A validity window pushed a timestamp out of the representable range.
    #[error("Timestamp out of range: {0}")]
    TimestampOverflow(String),

    /// A key group did not end up with the expected number of records.
    #[error("Invalid group size: expected {expected}, got {got}")]
    GroupSize { expected: usize, got: usize },

    /// Key does not follow the `PREFIX BODY:TYPE` layout
    #[error("Invalid key format")]
    InvalidFormat,

    /// Key starts with something outside the prefix table
    #[error("Unknown prefix in key '{0}'")]
    UnknownPrefix(String),

    /// Type suffix after the colon is neither 12H nor 24H
    #[error("Unknown key type: {0}")]
    UnknownType(String),
}

/// Result type alias for key generation operations.
pub type Result<T> = std::result::Result<T, KeyGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KeyGenError::GroupSize {
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "Invalid group size: expected 3, got 2");

        let err = KeyGenError::UnknownType("48H".into());
        assert_eq!(err.to_string(), "Unknown key type: 48H");
    }

    #[test]
    fn test_format_error_converts() {
        let err: KeyGenError = std::fmt::Error.into();
        assert!(matches!(err, KeyGenError::Format(_)));
    }
}
