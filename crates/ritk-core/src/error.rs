//! Error types for image containers.

use thiserror::Error;

/// Error type for image construction and pixel access.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Buffer or image shapes disagree.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A pixel index lies outside the image.
    #[error("Index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// The direction matrix has no inverse.
    #[error("Direction matrix is not invertible")]
    NonInvertibleDirection,
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

impl ImageError {
    /// Create a shape mismatch error from two shapes.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = ImageError::shape_mismatch(&[4, 4], &[2, 2]);
        assert_eq!(err.to_string(), "Shape mismatch: expected [4, 4], got [2, 2]");
    }

    #[test]
    fn test_index_out_of_bounds_display() {
        let err = ImageError::IndexOutOfBounds {
            index: vec![5, 0],
            shape: vec![4, 4],
        };
        assert!(err.to_string().contains("[5, 0]"));
    }
}
