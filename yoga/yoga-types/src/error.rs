//! Error types for yoga-types crate.

use thiserror::Error;

use crate::Joint;

/// Errors that can occur while building or decoding yoga-types values.
#[derive(Debug, Error)]
pub enum TypesError {
    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    DataSizeMismatch {
        /// Expected size.
        expected: usize,
        /// Actual size.
        actual: usize,
    },

    /// Invalid image dimensions.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// The same joint appeared twice in one skeleton.
    #[error("duplicate joint in skeleton: {0}")]
    DuplicateJoint(Joint),

    /// A joint name or index outside the landmark enumeration.
    #[error("unknown joint: {0}")]
    UnknownJoint(String),

    /// A pose class name or index outside the closed class set.
    #[error("unknown pose class: {0}")]
    UnknownPoseClass(String),

    /// Invalid confidence value.
    #[error("invalid confidence {value}: must be in [0, 1]")]
    InvalidConfidence {
        /// The invalid confidence value.
        value: f64,
    },
}

impl TypesError {
    /// Creates a data size mismatch error.
    #[must_use]
    pub const fn data_size_mismatch(expected: usize, actual: usize) -> Self {
        Self::DataSizeMismatch { expected, actual }
    }

    /// Creates an invalid dimensions error.
    #[must_use]
    pub const fn invalid_dimensions(width: u32, height: u32) -> Self {
        Self::InvalidDimensions { width, height }
    }

    /// Creates an unknown joint error.
    #[must_use]
    pub fn unknown_joint(name: impl Into<String>) -> Self {
        Self::UnknownJoint(name.into())
    }

    /// Creates an unknown pose class error.
    #[must_use]
    pub fn unknown_pose_class(name: impl Into<String>) -> Self {
        Self::UnknownPoseClass(name.into())
    }

    /// Creates an invalid confidence error.
    #[must_use]
    pub const fn invalid_confidence(value: f64) -> Self {
        Self::InvalidConfidence { value }
    }
}

/// Result type for yoga-types operations.
pub type Result<T> = std::result::Result<T, TypesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_data_size_mismatch() {
        let err = TypesError::data_size_mismatch(99, 33);
        assert!(err.to_string().contains("99"));
        assert!(err.to_string().contains("33"));
    }

    #[test]
    fn error_invalid_dimensions() {
        let err = TypesError::invalid_dimensions(0, 480);
        assert!(err.to_string().contains("0x480"));
    }

    #[test]
    fn error_duplicate_joint() {
        let err = TypesError::DuplicateJoint(Joint::LeftKnee);
        assert!(err.to_string().contains("left_knee"));
    }

    #[test]
    fn error_unknown_joint() {
        let err = TypesError::unknown_joint("left_tail");
        assert!(err.to_string().contains("left_tail"));
    }

    #[test]
    fn error_unknown_pose_class() {
        let err = TypesError::unknown_pose_class("Crow");
        assert!(err.to_string().contains("Crow"));
    }

    #[test]
    fn error_invalid_confidence() {
        let err = TypesError::invalid_confidence(1.5);
        assert!(err.to_string().contains("1.5"));
    }
}
