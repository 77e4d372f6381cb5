//! The classification call contract.
//!
//! A [`ScoreModel`] is anything that maps a normalized image tensor to one
//! probability per [`PoseClass`]. [`ClassificationAdapter`] wraps such a
//! model, enforces the input geometry, and reduces the scores to a single
//! [`ClassificationResult`]. The orchestrator only sees [`PoseClassifier`].

use tracing::debug;
use yoga_types::{ClassificationResult, ImageTensor, InputSpec, PoseClass};

use crate::error::{ModelError, Result};

/// A model that produces per-class probabilities.
///
/// Implementations must be safe to call from several threads at once. A
/// model that is not re-entrant has to serialize access internally.
pub trait ScoreModel: Send + Sync {
    /// The tensor geometry this model accepts.
    fn input_spec(&self) -> InputSpec;

    /// Returns one probability per pose class, in [`PoseClass::ALL`] order.
    ///
    /// The tensor is guaranteed to match [`input_spec`](Self::input_spec).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Inference`] if the model fails to run.
    fn scores(&self, tensor: &ImageTensor) -> Result<Vec<f32>>;
}

/// The narrow classification capability the orchestrator depends on.
pub trait PoseClassifier: Send + Sync {
    /// The tensor geometry the classifier accepts.
    fn input_spec(&self) -> InputSpec;

    /// Classifies a normalized image.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInputShape`] if the tensor does not
    /// match [`input_spec`](Self::input_spec), or any error raised while
    /// running the model.
    fn classify(&self, tensor: &ImageTensor) -> Result<ClassificationResult>;
}

impl<T: PoseClassifier + ?Sized> PoseClassifier for Box<T> {
    fn input_spec(&self) -> InputSpec {
        (**self).input_spec()
    }

    fn classify(&self, tensor: &ImageTensor) -> Result<ClassificationResult> {
        (**self).classify(tensor)
    }
}

impl<T: PoseClassifier + ?Sized> PoseClassifier for std::sync::Arc<T> {
    fn input_spec(&self) -> InputSpec {
        (**self).input_spec()
    }

    fn classify(&self, tensor: &ImageTensor) -> Result<ClassificationResult> {
        (**self).classify(tensor)
    }
}

/// Turns a [`ScoreModel`] into a [`PoseClassifier`].
///
/// The label is the class with the highest score (the first one on ties)
/// and the confidence is that score.
///
/// # Example
///
/// ```
/// use yoga_models::{ClassificationAdapter, PoseClassifier, ScoreModel};
/// use yoga_types::{ImageTensor, InputSpec, PoseClass};
///
/// struct Fixed;
///
/// impl ScoreModel for Fixed {
///     fn input_spec(&self) -> InputSpec {
///         InputSpec::square(4)
///     }
///
///     fn scores(&self, _: &ImageTensor) -> yoga_models::Result<Vec<f32>> {
///         Ok(vec![0.05, 0.8, 0.05, 0.05, 0.05])
///     }
/// }
///
/// let classifier = ClassificationAdapter::new(Fixed);
/// let tensor = ImageTensor::zeros(InputSpec::square(4))?;
/// let result = classifier.classify(&tensor)?;
///
/// assert_eq!(result.label, PoseClass::Tree);
///
/// // Resizing is the caller's job.
/// let wrong = ImageTensor::zeros(InputSpec::square(8))?;
/// assert!(classifier.classify(&wrong).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClassificationAdapter<M> {
    model: M,
}

impl<M: ScoreModel> ClassificationAdapter<M> {
    /// Wraps a score model.
    #[must_use]
    pub const fn new(model: M) -> Self {
        Self { model }
    }

    /// Returns the wrapped model.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Unwraps the adapter.
    #[must_use]
    pub fn into_inner(self) -> M {
        self.model
    }
}

impl<M: ScoreModel> PoseClassifier for ClassificationAdapter<M> {
    fn input_spec(&self) -> InputSpec {
        self.model.input_spec()
    }

    fn classify(&self, tensor: &ImageTensor) -> Result<ClassificationResult> {
        let spec = self.model.input_spec();
        if !spec.matches(tensor) {
            return Err(ModelError::invalid_input_shape(
                spec.to_string(),
                tensor.describe(),
            ));
        }

        let scores = self.model.scores(tensor)?;
        let result = select(&scores)?;
        debug!(label = %result.label, confidence = result.confidence, "classified pose");
        Ok(result)
    }
}

/// Reduces a score vector to its arg-max class.
fn select(scores: &[f32]) -> Result<ClassificationResult> {
    if scores.len() != PoseClass::COUNT {
        return Err(ModelError::score_length_mismatch(
            PoseClass::COUNT,
            scores.len(),
        ));
    }
    if let Some(index) = scores.iter().position(|s| !s.is_finite()) {
        return Err(ModelError::invalid_scores(format!(
            "non-finite score at index {index}"
        )));
    }

    let (index, &best) = scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, &f32)>, (i, s)| match best {
            Some((_, b)) if b >= s => best,
            _ => Some((i, s)),
        })
        .ok_or_else(|| ModelError::invalid_scores("empty score vector"))?;

    let label = PoseClass::from_index(index)
        .ok_or_else(|| ModelError::invalid_scores(format!("no pose class at index {index}")))?;

    ClassificationResult::new(label, f64::from(best))
        .map_err(|e| ModelError::invalid_scores(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Stub {
        spec: InputSpec,
        scores: Vec<f32>,
        calls: AtomicUsize,
    }

    impl Stub {
        fn new(scores: Vec<f32>) -> Self {
            Self {
                spec: InputSpec::square(4),
                scores,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ScoreModel for Stub {
        fn input_spec(&self) -> InputSpec {
            self.spec
        }

        fn scores(&self, _: &ImageTensor) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.scores.clone())
        }
    }

    fn tensor(spec: InputSpec) -> ImageTensor {
        ImageTensor::zeros(spec).unwrap()
    }

    #[test]
    fn picks_arg_max() {
        let adapter = ClassificationAdapter::new(Stub::new(vec![0.1, 0.05, 0.6, 0.2, 0.05]));
        let result = adapter.classify(&tensor(InputSpec::square(4))).unwrap();
        assert_eq!(result.label, PoseClass::Cobra);
        assert!((result.confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn ties_resolve_to_first_class() {
        let adapter = ClassificationAdapter::new(Stub::new(vec![0.1, 0.4, 0.1, 0.4, 0.0]));
        let result = adapter.classify(&tensor(InputSpec::square(4))).unwrap();
        assert_eq!(result.label, PoseClass::Tree);
    }

    #[test]
    fn confidence_survives_to_percent() {
        let adapter = ClassificationAdapter::new(Stub::new(vec![0.0, 0.873, 0.127, 0.0, 0.0]));
        let result = adapter.classify(&tensor(InputSpec::square(4))).unwrap();
        assert_eq!(result.confidence_percent(), 87.3);
    }

    #[test]
    fn wrong_size_is_rejected_before_inference() {
        let adapter = ClassificationAdapter::new(Stub::new(vec![0.2; 5]));
        let err = adapter
            .classify(&tensor(InputSpec::square(224)))
            .unwrap_err();

        assert!(matches!(err, ModelError::InvalidInputShape { .. }));
        assert!(err.to_string().contains("4x4x3 rgb"));
        assert_eq!(adapter.model().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn wrong_channel_order_is_rejected() {
        use yoga_types::ChannelOrder;

        let adapter = ClassificationAdapter::new(Stub::new(vec![0.2; 5]));
        let bgr = InputSpec::square(4).with_channel_order(ChannelOrder::Bgr);
        assert!(matches!(
            adapter.classify(&tensor(bgr)),
            Err(ModelError::InvalidInputShape { .. })
        ));
    }

    #[test]
    fn wrong_score_count_is_rejected() {
        let adapter = ClassificationAdapter::new(Stub::new(vec![0.5, 0.5]));
        assert!(matches!(
            adapter.classify(&tensor(InputSpec::square(4))),
            Err(ModelError::ScoreLengthMismatch {
                expected: 5,
                actual: 2
            })
        ));
    }

    #[test]
    fn non_finite_scores_are_rejected() {
        let adapter =
            ClassificationAdapter::new(Stub::new(vec![0.1, f32::NAN, 0.1, 0.1, 0.1]));
        assert!(matches!(
            adapter.classify(&tensor(InputSpec::square(4))),
            Err(ModelError::InvalidScores(_))
        ));
    }

    #[test]
    fn logits_are_not_probabilities() {
        let adapter = ClassificationAdapter::new(Stub::new(vec![3.5, 0.1, 0.1, 0.1, 0.1]));
        assert!(matches!(
            adapter.classify(&tensor(InputSpec::square(4))),
            Err(ModelError::InvalidScores(_))
        ));
    }

    #[test]
    fn shared_classifier_delegates() {
        let shared: Arc<dyn PoseClassifier> =
            Arc::new(ClassificationAdapter::new(Stub::new(vec![0.0, 0.0, 0.0, 0.0, 1.0])));
        assert_eq!(shared.input_spec(), InputSpec::square(4));
        assert_eq!(
            shared.classify(&tensor(InputSpec::square(4))).unwrap().label,
            PoseClass::Chair
        );
    }
}
