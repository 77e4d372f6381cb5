//! The landmark estimation boundary.

use std::path::Path;

use serde::Deserialize;
use yoga_types::{LandmarkPoint, RgbFrame, Skeleton};

use crate::error::{AssessError, Result};

/// Extracts a skeleton from an image.
///
/// This is the narrow capability the orchestrator depends on. Returning
/// `Ok(None)` means nobody was found; `Err` means the estimator itself
/// failed. Implementations must tolerate concurrent calls; wrap one that
/// does not in [`Exclusive`](crate::Exclusive) via [`LandmarkEstimatorMut`].
pub trait LandmarkEstimator: Send + Sync {
    /// Returns the skeleton of the person in the frame, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Estimator`] if estimation fails.
    fn extract(&self, frame: &RgbFrame) -> Result<Option<Skeleton>>;
}

/// An estimator that needs exclusive access for each call.
pub trait LandmarkEstimatorMut: Send {
    /// Returns the skeleton of the person in the frame, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Estimator`] if estimation fails.
    fn extract(&mut self, frame: &RgbFrame) -> Result<Option<Skeleton>>;
}

impl<T: LandmarkEstimator + ?Sized> LandmarkEstimator for Box<T> {
    fn extract(&self, frame: &RgbFrame) -> Result<Option<Skeleton>> {
        (**self).extract(frame)
    }
}

impl<T: LandmarkEstimator + ?Sized> LandmarkEstimator for std::sync::Arc<T> {
    fn extract(&self, frame: &RgbFrame) -> Result<Option<Skeleton>> {
        (**self).extract(frame)
    }
}

/// Replays a previously captured estimator result for every frame.
///
/// Used by the CLI and by tests to drive the pipeline from a landmark
/// dump instead of a live estimator.
///
/// # Example
///
/// ```
/// use yoga_assess::{LandmarkEstimator, ReplayEstimator};
/// use yoga_types::RgbFrame;
///
/// let frame = RgbFrame::filled(4, 4, [0, 0, 0])?;
/// let nobody = ReplayEstimator::nobody();
/// assert!(nobody.extract(&frame)?.is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayEstimator {
    skeleton: Option<Skeleton>,
}

/// Landmark dump formats accepted by [`ReplayEstimator::from_json`].
#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkDump {
    /// Raw estimator output: 33 `[x, y, z, visibility]` rows.
    Rows(Vec<[f32; 4]>),
    /// Named points.
    Points(Vec<LandmarkPoint>),
}

impl ReplayEstimator {
    /// Replays the given result.
    #[must_use]
    pub const fn new(skeleton: Option<Skeleton>) -> Self {
        Self { skeleton }
    }

    /// Replays a detected skeleton.
    #[must_use]
    pub const fn detected(skeleton: Skeleton) -> Self {
        Self::new(Some(skeleton))
    }

    /// Replays "nobody in frame".
    #[must_use]
    pub const fn nobody() -> Self {
        Self::new(None)
    }

    /// Parses a landmark dump.
    ///
    /// Accepts `null` or `[]` (no detection), a list of 33
    /// `[x, y, z, visibility]` rows in landmark index order, or a list of
    /// named points such as `{"joint": "left_knee", "x": 0.5, "y": 0.7,
    /// "visibility": 0.98}`.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Estimator`] if the dump cannot be parsed, and
    /// [`AssessError::Types`] if it describes an invalid skeleton.
    pub fn from_json(json: &str) -> Result<Self> {
        let dump: Option<LandmarkDump> = serde_json::from_str(json)
            .map_err(|e| AssessError::estimator(format!("invalid landmark dump: {e}")))?;

        let skeleton = match dump {
            None => None,
            Some(LandmarkDump::Rows(rows)) if rows.is_empty() => None,
            Some(LandmarkDump::Rows(rows)) => Some(Skeleton::from_landmark_rows(&rows)?),
            Some(LandmarkDump::Points(points)) => Some(Skeleton::from_points(points)?),
        };
        Ok(Self::new(skeleton))
    }

    /// Reads a landmark dump from a file.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Estimator`] if the file cannot be read, plus
    /// the [`from_json`](Self::from_json) errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| AssessError::estimator(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Returns the replayed skeleton.
    #[must_use]
    pub const fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }
}

impl LandmarkEstimator for ReplayEstimator {
    fn extract(&self, _frame: &RgbFrame) -> Result<Option<Skeleton>> {
        Ok(self.skeleton.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use yoga_types::{Joint, TypesError};

    fn frame() -> RgbFrame {
        RgbFrame::filled(8, 8, [40, 40, 40]).unwrap()
    }

    #[test]
    fn replays_detection() {
        let skeleton = Skeleton::from_points(vec![LandmarkPoint::new(
            Joint::Nose,
            0.5,
            0.1,
            0.99,
        )])
        .unwrap();
        let estimator = ReplayEstimator::detected(skeleton.clone());

        assert_eq!(estimator.extract(&frame()).unwrap(), Some(skeleton.clone()));
        assert_eq!(estimator.extract(&frame()).unwrap(), Some(skeleton));
    }

    #[test]
    fn parses_empty_dumps() {
        assert!(ReplayEstimator::from_json("null").unwrap().skeleton().is_none());
        assert!(ReplayEstimator::from_json("[]").unwrap().skeleton().is_none());
    }

    #[test]
    fn parses_named_points() {
        let json = r#"[
            {"joint": "left_hip", "x": 0.5, "y": 0.6, "visibility": 0.99},
            {"joint": "left_knee", "x": 0.5, "y": 0.8, "z": -0.1, "visibility": 0.97}
        ]"#;
        let estimator = ReplayEstimator::from_json(json).unwrap();
        let skeleton = estimator.skeleton().unwrap();

        assert_eq!(skeleton.len(), 2);
        assert_eq!(skeleton.get(Joint::LeftKnee).unwrap().z, Some(-0.1));
    }

    #[test]
    fn parses_landmark_rows() {
        let rows = vec![[0.5_f32, 0.5, 0.0, 0.9]; Joint::COUNT];
        let json = serde_json::to_string(&rows).unwrap();

        let estimator = ReplayEstimator::from_json(&json).unwrap();
        assert_eq!(estimator.skeleton().unwrap().len(), Joint::COUNT);
    }

    #[test]
    fn rejects_short_row_dump() {
        let err = ReplayEstimator::from_json("[[0.5, 0.5, 0.0, 0.9]]").unwrap_err();
        assert!(matches!(
            err,
            AssessError::Types(TypesError::DataSizeMismatch { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_joints() {
        let json = r#"[
            {"joint": "nose", "x": 0.5, "y": 0.1, "visibility": 0.9},
            {"joint": "nose", "x": 0.6, "y": 0.1, "visibility": 0.9}
        ]"#;
        assert!(matches!(
            ReplayEstimator::from_json(json),
            Err(AssessError::Types(TypesError::DuplicateJoint(Joint::Nose)))
        ));
    }

    #[test]
    fn rejects_malformed_dump() {
        assert!(matches!(
            ReplayEstimator::from_json("{\"pose\": 1}"),
            Err(AssessError::Estimator(_))
        ));
    }

    #[test]
    fn load_missing_file() {
        assert!(matches!(
            ReplayEstimator::load("/nonexistent/landmarks.json"),
            Err(AssessError::Estimator(_))
        ));
    }
}
