//! Error types for yoga-align crate.

use thiserror::Error;
use yoga_types::Joint;

/// Reasons a single alignment rule cannot be evaluated.
///
/// None of these fail an evaluation: the engine skips the affected rule
/// and continues with the next one.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AlignError {
    /// One of the two arms of the angle has zero length.
    #[error("degenerate geometry at {vertex}: coincident landmarks")]
    DegenerateGeometry {
        /// The joint at the angle vertex.
        vertex: Joint,
    },

    /// The skeleton has no point for a referenced joint.
    #[error("missing joint: {0}")]
    MissingJoint(Joint),

    /// A referenced joint is below the engine's visibility gate.
    #[error("joint {joint} below visibility threshold: {visibility} < {threshold}")]
    LowVisibility {
        /// The under-visible joint.
        joint: Joint,
        /// Its visibility score.
        visibility: f32,
        /// The configured threshold.
        threshold: f32,
    },

    /// A referenced joint has a NaN or infinite coordinate or visibility.
    #[error("non-finite landmark: {0}")]
    NonFiniteLandmark(Joint),
}

impl AlignError {
    /// Creates a degenerate geometry error.
    #[must_use]
    pub const fn degenerate(vertex: Joint) -> Self {
        Self::DegenerateGeometry { vertex }
    }

    /// Creates a missing joint error.
    #[must_use]
    pub const fn missing_joint(joint: Joint) -> Self {
        Self::MissingJoint(joint)
    }

    /// Creates a low visibility error.
    #[must_use]
    pub const fn low_visibility(joint: Joint, visibility: f32, threshold: f32) -> Self {
        Self::LowVisibility {
            joint,
            visibility,
            threshold,
        }
    }

    /// Creates a non-finite landmark error.
    #[must_use]
    pub const fn non_finite(joint: Joint) -> Self {
        Self::NonFiniteLandmark(joint)
    }
}

/// Result type for yoga-align operations.
pub type Result<T> = std::result::Result<T, AlignError>;
