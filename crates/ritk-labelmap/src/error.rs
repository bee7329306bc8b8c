//! Error types for object map operations.

use ritk_core::error::ImageError;
use thiserror::Error;

/// Main error type for object map operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabelMapError {
    /// No entry carries the requested name.
    #[error("Object entry not found: {0}")]
    NotFound(String),

    /// Argument outside the accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Embedded entry table could not be decoded.
    #[error("Malformed object map metadata: {0}")]
    MalformedMetadata(String),

    /// Pixel labels and the entry table disagree.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Source image does not share the map's grid.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// The entry table is full.
    #[error("Object map capacity exceeded: at most {limit} entries")]
    CapacityExceeded { limit: usize },

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Result type for object map operations.
pub type Result<T> = std::result::Result<T, LabelMapError>;

impl LabelMapError {
    /// Create a not-found error for `name`.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a malformed metadata error.
    pub fn malformed_metadata(msg: impl Into<String>) -> Self {
        Self::MalformedMetadata(msg.into())
    }

    /// Create an invariant violation error.
    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Whether this error only reports an absent entry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LabelMapError::not_found("liver");
        assert!(matches!(err, LabelMapError::NotFound(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = LabelMapError::invalid_argument("entry 0 is the background");
        assert_eq!(err.to_string(), "Invalid argument: entry 0 is the background");
    }

    #[test]
    fn test_image_error_is_transparent() {
        let err: LabelMapError = ImageError::NonInvertibleDirection.into();
        assert_eq!(err.to_string(), "Direction matrix is not invertible");
        assert!(!err.is_not_found());
    }
}
