//! The assessment orchestrator.

use tracing::{debug, info, warn};
use yoga_align::AlignmentEngine;
use yoga_models::PoseClassifier;
use yoga_types::{Assessment, AssessmentResponse, ClassificationResult, RgbFrame};

use crate::config::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::error::{AssessError, Result};
use crate::estimator::LandmarkEstimator;
use crate::normalize::normalize;

/// Assesses a yoga pose from a single frame.
///
/// Each call runs extract, analyze, classify, and assemble, stopping at the
/// first failure. When the estimator finds nobody the classifier is never
/// invoked.
///
/// The assessor holds no per-request state. It is `Send + Sync` whenever
/// its collaborators are, so one instance can serve concurrent requests.
///
/// # Example
///
/// ```
/// use yoga_assess::{Assessor, ReplayEstimator};
/// use yoga_models::{ClassificationAdapter, ScoreModel};
/// use yoga_types::{AssessmentResponse, ImageTensor, InputSpec, RgbFrame};
///
/// struct AlwaysTree;
///
/// impl ScoreModel for AlwaysTree {
///     fn input_spec(&self) -> InputSpec {
///         InputSpec::square(8)
///     }
///
///     fn scores(&self, _: &ImageTensor) -> yoga_models::Result<Vec<f32>> {
///         Ok(vec![0.0, 1.0, 0.0, 0.0, 0.0])
///     }
/// }
///
/// let assessor = Assessor::new(
///     ReplayEstimator::nobody(),
///     ClassificationAdapter::new(AlwaysTree),
/// );
///
/// let frame = RgbFrame::filled(32, 32, [0, 0, 0])?;
/// let response = assessor.respond(&frame)?;
/// assert_eq!(response, AssessmentResponse::no_person_detected());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Assessor<E, C> {
    estimator: E,
    classifier: C,
    engine: AlignmentEngine,
    confidence_threshold: f64,
}

impl<E, C> Assessor<E, C>
where
    E: LandmarkEstimator,
    C: PoseClassifier,
{
    /// Creates an assessor over the default rule table.
    #[must_use]
    pub const fn new(estimator: E, classifier: C) -> Self {
        Self {
            estimator,
            classifier,
            engine: AlignmentEngine::new(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Replaces the alignment engine.
    #[must_use]
    pub const fn with_engine(mut self, engine: AlignmentEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the confidence at which a pose counts as held.
    #[must_use]
    pub const fn with_confidence_threshold(mut self, confidence_threshold: f64) -> Self {
        self.confidence_threshold = confidence_threshold;
        self
    }

    /// Returns the held-pose confidence threshold.
    #[must_use]
    pub const fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Returns `true` if a classification is confident enough for the pose
    /// to count as held.
    #[must_use]
    pub fn is_held(&self, classification: &ClassificationResult) -> bool {
        classification.is_confident(self.confidence_threshold)
    }

    /// Returns the alignment engine.
    #[must_use]
    pub const fn engine(&self) -> &AlignmentEngine {
        &self.engine
    }

    /// Returns the landmark estimator.
    #[must_use]
    pub const fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Returns the classifier.
    #[must_use]
    pub const fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Assesses one frame.
    ///
    /// # Errors
    ///
    /// - [`AssessError::NoPersonDetected`] if the estimator finds nobody
    /// - [`AssessError::Estimator`] if the estimator fails
    /// - [`AssessError::Classification`] if the classifier rejects the
    ///   normalized tensor or fails to run
    pub fn assess(&self, frame: &RgbFrame) -> Result<Assessment> {
        let Some(skeleton) = self.estimator.extract(frame)? else {
            warn!(
                width = frame.width(),
                height = frame.height(),
                "no person detected"
            );
            return Err(AssessError::NoPersonDetected);
        };
        debug!(joints = skeleton.len(), "extracted skeleton");

        let feedback = self.engine.evaluate(&skeleton);
        debug!(tips = feedback.len(), "evaluated alignment");

        let tensor = normalize(frame, &self.classifier.input_spec())?;
        let classification = self.classifier.classify(&tensor)?;
        let held = self.is_held(&classification);

        let assessment = Assessment::new(&classification, feedback);
        info!(
            pose = %assessment.pose,
            confidence = assessment.confidence,
            held,
            tips = assessment.feedback.len(),
            "assessment complete"
        );
        Ok(assessment)
    }

    /// Assesses one frame and shapes the outcome for a caller.
    ///
    /// Nobody in frame becomes the structured `{"error": "No person
    /// detected"}` response rather than an error.
    ///
    /// # Errors
    ///
    /// Returns every [`assess`](Self::assess) error except
    /// [`AssessError::NoPersonDetected`].
    pub fn respond(&self, frame: &RgbFrame) -> Result<AssessmentResponse> {
        match self.assess(frame) {
            Ok(assessment) => Ok(assessment.into()),
            Err(AssessError::NoPersonDetected) => Ok(AssessmentResponse::no_person_detected()),
            Err(err) => Err(err),
        }
    }
}
