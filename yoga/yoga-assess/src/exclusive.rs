//! Serialized access to collaborators that are not re-entrant.

use std::sync::{Mutex, PoisonError};

use yoga_models::{ModelError, PoseClassifier};
use yoga_types::{ClassificationResult, ImageTensor, InputSpec, RgbFrame, Skeleton};

use crate::error::{AssessError, Result};
use crate::estimator::{LandmarkEstimator, LandmarkEstimatorMut};

/// A classifier that needs exclusive access for each call.
pub trait PoseClassifierMut: Send {
    /// The tensor geometry the classifier accepts.
    fn input_spec(&self) -> InputSpec;

    /// Classifies a normalized image.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInputShape`] for a mismatched tensor, or
    /// any error raised while running the model.
    fn classify(&mut self, tensor: &ImageTensor) -> yoga_models::Result<ClassificationResult>;
}

/// Wraps a collaborator in a mutex so one instance can serve concurrent
/// requests.
///
/// Calls are serialized. A call that panicked poisons the lock, after which
/// every call fails with an estimator or classifier error instead of
/// touching possibly inconsistent state.
///
/// # Example
///
/// ```
/// use yoga_assess::{Exclusive, LandmarkEstimator, LandmarkEstimatorMut};
/// use yoga_types::{RgbFrame, Skeleton};
///
/// /// Counts frames; needs `&mut self`.
/// struct Counting(usize);
///
/// impl LandmarkEstimatorMut for Counting {
///     fn extract(&mut self, _: &RgbFrame) -> yoga_assess::Result<Option<Skeleton>> {
///         self.0 += 1;
///         Ok(None)
///     }
/// }
///
/// let shared = Exclusive::new(Counting(0));
/// let frame = RgbFrame::filled(2, 2, [0, 0, 0])?;
/// LandmarkEstimator::extract(&shared, &frame)?;
/// LandmarkEstimator::extract(&shared, &frame)?;
/// assert_eq!(shared.into_inner().map(|c| c.0), Some(2));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Exclusive<T> {
    inner: Mutex<T>,
}

impl<T> Exclusive<T> {
    /// Wraps a collaborator.
    #[must_use]
    pub const fn new(inner: T) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Returns the collaborator, or `None` if a call panicked while holding
    /// it.
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.inner.into_inner().ok()
    }
}

impl<T: LandmarkEstimatorMut> LandmarkEstimator for Exclusive<T> {
    fn extract(&self, frame: &RgbFrame) -> Result<Option<Skeleton>> {
        let mut estimator = self
            .inner
            .lock()
            .map_err(|e| AssessError::estimator(e.to_string()))?;
        estimator.extract(frame)
    }
}

impl<T: PoseClassifierMut> PoseClassifier for Exclusive<T> {
    fn input_spec(&self) -> InputSpec {
        // Reading the geometry is safe even after a poisoning panic.
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .input_spec()
    }

    fn classify(&self, tensor: &ImageTensor) -> yoga_models::Result<ClassificationResult> {
        let mut classifier = self
            .inner
            .lock()
            .map_err(|e| ModelError::unavailable(e.to_string()))?;
        classifier.classify(tensor)
    }
}
