//! Error types for yoga-assess crate.

use thiserror::Error;
use yoga_models::ModelError;
use yoga_types::TypesError;

/// Errors that can end an assessment.
///
/// [`AssessError::NoPersonDetected`] is an expected outcome and is turned
/// into a structured response by [`Assessor::respond`]. Everything else is
/// a hard failure for the caller.
///
/// [`Assessor::respond`]: crate::Assessor::respond
#[derive(Debug, Error)]
pub enum AssessError {
    /// The estimator found nobody in the image.
    #[error("no person detected")]
    NoPersonDetected,

    /// The landmark estimator failed.
    #[error("landmark estimator failed: {0}")]
    Estimator(String),

    /// The classifier rejected its input or failed to run.
    #[error("classification failed: {0}")]
    Classification(#[from] ModelError),

    /// An image or tensor could not be built.
    #[error(transparent)]
    Types(#[from] TypesError),

    /// Configuration could not be read, written, or validated.
    #[error("configuration error at {path}: {reason}")]
    Config {
        /// Path to the configuration file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

impl AssessError {
    /// Creates an estimator error.
    #[must_use]
    pub fn estimator(reason: impl Into<String>) -> Self {
        Self::Estimator(reason.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the request ended because nobody was in frame.
    #[must_use]
    pub const fn is_no_person(&self) -> bool {
        matches!(self, Self::NoPersonDetected)
    }
}

/// Result type for yoga-assess operations.
pub type Result<T> = std::result::Result<T, AssessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_no_person() {
        let err = AssessError::NoPersonDetected;
        assert_eq!(err.to_string(), "no person detected");
        assert!(err.is_no_person());
    }

    #[test]
    fn error_estimator() {
        let err = AssessError::estimator("model file missing");
        assert!(err.to_string().contains("model file missing"));
        assert!(!err.is_no_person());
    }

    #[test]
    fn error_from_model_error() {
        let err: AssessError = ModelError::invalid_input_shape("224x224x3 rgb", "64x64x3 rgb").into();
        assert!(matches!(
            err,
            AssessError::Classification(ModelError::InvalidInputShape { .. })
        ));
        assert!(err.to_string().contains("224x224x3 rgb"));
    }

    #[test]
    fn error_from_types_error() {
        let err: AssessError = TypesError::invalid_dimensions(0, 480).into();
        assert!(matches!(err, AssessError::Types(_)));
    }

    #[test]
    fn error_config() {
        let err = AssessError::config("yoga.toml", "expected a table");
        assert!(err.to_string().contains("yoga.toml"));
        assert!(err.to_string().contains("expected a table"));
    }
}
