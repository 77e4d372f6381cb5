//! The per-request assessment verdict and its wire shape.

use serde::{Deserialize, Serialize};

use crate::{ClassificationResult, PoseClass};

/// Message reported when the estimator finds nobody in the image.
pub const NO_PERSON_DETECTED: &str = "No person detected";

/// The fused verdict for one image.
///
/// # Example
///
/// ```
/// use yoga_types::{Assessment, ClassificationResult, PoseClass};
///
/// let classification = ClassificationResult::new(PoseClass::Tree, 0.873)?;
/// let assessment = Assessment::new(&classification, vec!["Straighten your arms.".into()]);
///
/// assert_eq!(assessment.pose, PoseClass::Tree);
/// assert!((assessment.confidence - 87.3).abs() < 1e-9);
/// # Ok::<(), yoga_types::TypesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Classified pose.
    pub pose: PoseClass,
    /// Classifier confidence as a percentage `[0, 100]`, two decimals.
    pub confidence: f64,
    /// Corrective tips in rule declaration order. Never empty.
    pub feedback: Vec<String>,
}

impl Assessment {
    /// Assembles an assessment from a classification and feedback tips.
    #[must_use]
    pub fn new(classification: &ClassificationResult, feedback: Vec<String>) -> Self {
        Self {
            pose: classification.label,
            confidence: classification.confidence_percent(),
            feedback,
        }
    }
}

/// What a caller receives for one assessment request.
///
/// Serializes either as the assessment fields or as `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssessmentResponse {
    /// A completed assessment.
    Assessment(Assessment),
    /// A structured, non-fatal failure.
    Error {
        /// Human-readable reason.
        error: String,
    },
}

impl AssessmentResponse {
    /// The response for an image with nobody in it.
    #[must_use]
    pub fn no_person_detected() -> Self {
        Self::Error {
            error: NO_PERSON_DETECTED.to_string(),
        }
    }

    /// Returns the assessment, if any.
    #[must_use]
    pub const fn assessment(&self) -> Option<&Assessment> {
        match self {
            Self::Assessment(a) => Some(a),
            Self::Error { .. } => None,
        }
    }

    /// Returns `true` for the structured error variant.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl From<Assessment> for AssessmentResponse {
    fn from(assessment: Assessment) -> Self {
        Self::Assessment(assessment)
    }
}
