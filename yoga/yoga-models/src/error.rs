//! Error types for yoga-models crate.

use thiserror::Error;

/// Errors that can occur in classification and model persistence.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The input tensor does not have the geometry the model requires.
    ///
    /// This is an integration bug between normalization and the model; it
    /// is never recovered by resizing.
    #[error("invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape {
        /// Required geometry.
        expected: String,
        /// Supplied geometry.
        actual: String,
    },

    /// The model returned the wrong number of class scores.
    #[error("score vector has {actual} entries, expected {expected}")]
    ScoreLengthMismatch {
        /// Number of pose classes.
        expected: usize,
        /// Number of scores returned.
        actual: usize,
    },

    /// The model returned scores that are not probabilities.
    #[error("invalid scores: {0}")]
    InvalidScores(String),

    /// The model failed while running.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Failed to load checkpoint.
    #[error("failed to load checkpoint from {path}: {reason}")]
    LoadCheckpoint {
        /// Path to the checkpoint file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to save checkpoint.
    #[error("failed to save checkpoint to {path}: {reason}")]
    SaveCheckpoint {
        /// Path to the checkpoint file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Checkpoint file not found.
    #[error("checkpoint not found: {0}")]
    CheckpointNotFound(String),

    /// Unsupported checkpoint format.
    #[error("unsupported checkpoint format: {0}")]
    UnsupportedFormat(String),

    /// Invalid model configuration.
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),

    /// A shared model could not be acquired.
    #[error("classifier unavailable: {0}")]
    CollaboratorUnavailable(String),
}

impl ModelError {
    /// Creates an invalid input shape error.
    #[must_use]
    pub fn invalid_input_shape(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidInputShape {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a score length mismatch error.
    #[must_use]
    pub const fn score_length_mismatch(expected: usize, actual: usize) -> Self {
        Self::ScoreLengthMismatch { expected, actual }
    }

    /// Creates an invalid scores error.
    #[must_use]
    pub fn invalid_scores(reason: impl Into<String>) -> Self {
        Self::InvalidScores(reason.into())
    }

    /// Creates an inference error.
    #[must_use]
    pub fn inference(reason: impl Into<String>) -> Self {
        Self::Inference(reason.into())
    }

    /// Creates a load checkpoint error.
    #[must_use]
    pub fn load_checkpoint(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadCheckpoint {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a save checkpoint error.
    #[must_use]
    pub fn save_checkpoint(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SaveCheckpoint {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a checkpoint not found error.
    #[must_use]
    pub fn checkpoint_not_found(path: impl Into<String>) -> Self {
        Self::CheckpointNotFound(path.into())
    }

    /// Creates an unsupported format error.
    #[must_use]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a collaborator unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable(reason.into())
    }

    /// Returns `true` for errors caused by a caller handing the model
    /// input it cannot accept.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidInputShape { .. })
    }
}

/// Result type for yoga-models operations.
pub type Result<T> = std::result::Result<T, ModelError>;
