//! Landmark points and per-person skeletons produced by a pose estimator.

use hashbrown::HashMap;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::Joint;
use crate::error::{Result, TypesError};

/// A single detected landmark.
///
/// `x` and `y` are normalized to `[0, 1]` relative to the image width and
/// height. `z` is the estimator's relative depth when it provides one.
///
/// # Example
///
/// ```
/// use yoga_types::{Joint, LandmarkPoint};
///
/// let elbow = LandmarkPoint::new(Joint::LeftElbow, 0.4, 0.5, 0.98);
/// assert!(elbow.is_visible(0.5));
/// assert!(elbow.z.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    /// Which joint this point locates.
    pub joint: Joint,
    /// X coordinate (normalized `[0, 1]`).
    pub x: f32,
    /// Y coordinate (normalized `[0, 1]`).
    pub y: f32,
    /// Optional relative depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    /// Estimator visibility score `[0, 1]`.
    pub visibility: f32,
}

impl LandmarkPoint {
    /// Creates a 2D landmark.
    #[must_use]
    pub const fn new(joint: Joint, x: f32, y: f32, visibility: f32) -> Self {
        Self {
            joint,
            x,
            y,
            z: None,
            visibility,
        }
    }

    /// Sets the relative depth.
    #[must_use]
    pub const fn with_z(mut self, z: f32) -> Self {
        self.z = Some(z);
        self
    }

    /// Returns `true` if the visibility score meets the threshold.
    #[must_use]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }

    /// Returns the 2D projection of this landmark.
    #[must_use]
    pub fn position(&self) -> Point2<f64> {
        Point2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Returns `true` if every coordinate and the visibility are finite.
    ///
    /// Coordinates outside `[0, 1]` are allowed: estimators report joints
    /// that fall just outside the frame.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_none_or(f32::is_finite)
            && self.visibility.is_finite()
    }
}

/// The detected landmarks of one person, keyed by joint.
///
/// Keys are unique. Serialized as a list of [`LandmarkPoint`]s; decoding a
/// list that names a joint twice fails.
///
/// # Example
///
/// ```
/// use yoga_types::{Joint, LandmarkPoint, Skeleton};
///
/// let skeleton = Skeleton::from_points(vec![
///     LandmarkPoint::new(Joint::LeftShoulder, 0.4, 0.3, 0.9),
///     LandmarkPoint::new(Joint::LeftElbow, 0.4, 0.5, 0.9),
/// ])?;
///
/// assert_eq!(skeleton.len(), 2);
/// assert!(skeleton.get(Joint::LeftWrist).is_none());
/// # Ok::<(), yoga_types::TypesError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LandmarkPoint>", into = "Vec<LandmarkPoint>")]
pub struct Skeleton {
    points: HashMap<Joint, LandmarkPoint>,
}

impl Skeleton {
    /// Creates an empty skeleton.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a skeleton from a list of points.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::DuplicateJoint`] if a joint appears twice.
    pub fn from_points(points: impl IntoIterator<Item = LandmarkPoint>) -> Result<Self> {
        let mut skeleton = Self::new();
        for point in points {
            if skeleton.insert(point).is_some() {
                return Err(TypesError::DuplicateJoint(point.joint));
            }
        }
        Ok(skeleton)
    }

    /// Builds a skeleton from raw estimator rows of `[x, y, z, visibility]`.
    ///
    /// Row `i` is assigned to `Joint::from_index(i)`.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::DataSizeMismatch`] unless exactly
    /// [`Joint::COUNT`] rows are given.
    pub fn from_landmark_rows(rows: &[[f32; 4]]) -> Result<Self> {
        if rows.len() != Joint::COUNT {
            return Err(TypesError::data_size_mismatch(Joint::COUNT, rows.len()));
        }

        let points = Joint::ALL
            .iter()
            .zip(rows)
            .map(|(&joint, &[x, y, z, visibility])| {
                (joint, LandmarkPoint::new(joint, x, y, visibility).with_z(z))
            })
            .collect();

        Ok(Self { points })
    }

    /// Inserts a point, returning the one it replaced.
    pub fn insert(&mut self, point: LandmarkPoint) -> Option<LandmarkPoint> {
        self.points.insert(point.joint, point)
    }

    /// Removes a joint, returning its point.
    pub fn remove(&mut self, joint: Joint) -> Option<LandmarkPoint> {
        self.points.remove(&joint)
    }

    /// Gets the point for a joint.
    #[must_use]
    pub fn get(&self, joint: Joint) -> Option<&LandmarkPoint> {
        self.points.get(&joint)
    }

    /// Returns `true` if the joint was detected.
    #[must_use]
    pub fn contains(&self, joint: Joint) -> bool {
        self.points.contains_key(&joint)
    }

    /// Returns the number of detected joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no joints were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points ordered by joint index.
    #[must_use]
    pub fn points(&self) -> Vec<LandmarkPoint> {
        let mut points: Vec<_> = self.points.values().copied().collect();
        points.sort_by_key(|p| p.joint);
        points
    }

}

impl TryFrom<Vec<LandmarkPoint>> for Skeleton {
    type Error = TypesError;

    fn try_from(points: Vec<LandmarkPoint>) -> Result<Self> {
        Self::from_points(points)
    }
}

impl From<Skeleton> for Vec<LandmarkPoint> {
    fn from(skeleton: Skeleton) -> Self {
        skeleton.points()
    }
}
