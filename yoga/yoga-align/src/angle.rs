//! Joint angle computation.
//!
//! The angle at a vertex `b` between neighbors `a` and `c` is
//! `acos((ba · bc) / (|ba| |bc|))`, reported in whole degrees. It is
//! evaluated as `atan2(|ba × bc|, ba · bc)`, which is the same angle but
//! stays accurate next to 0 and 180 degrees.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use yoga_types::{Joint, LandmarkPoint, Skeleton};

use crate::error::{AlignError, Result};

/// Arms shorter than this are treated as zero length.
const MIN_ARM_LENGTH: f64 = 1e-12;

/// Snapping precision applied before truncation, so that `179.999_999_999`
/// from floating error still reports as 180.
const SNAP: f64 = 1e6;

/// One of the two arms of an angle has zero length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coincident landmarks: angle is undefined")]
pub struct DegenerateGeometry;

/// Computes the angle at `b` formed by `a` and `c`, in whole degrees.
///
/// The result lies in `[0, 180]` and does not depend on the order of `a`
/// and `c`.
///
/// # Errors
///
/// Returns [`DegenerateGeometry`] if `a` or `c` coincides with `b`, or if
/// any coordinate is NaN or infinite.
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use yoga_align::joint_angle;
///
/// let shoulder = Point2::new(0.0, 0.0);
/// let elbow = Point2::new(0.5, 0.0);
/// let wrist = Point2::new(0.5, 0.5);
///
/// assert_eq!(joint_angle(&shoulder, &elbow, &wrist), Ok(90.0));
/// ```
pub fn joint_angle(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
) -> std::result::Result<f64, DegenerateGeometry> {
    let ba = a - b;
    let bc = c - b;

    // NaN fails both comparisons, so test for a usable length.
    let usable = |len: f64| len.is_finite() && len >= MIN_ARM_LENGTH;
    if !usable(ba.norm()) || !usable(bc.norm()) {
        return Err(DegenerateGeometry);
    }

    let degrees = ba.perp(&bc).abs().atan2(ba.dot(&bc)).to_degrees();
    if !degrees.is_finite() {
        return Err(DegenerateGeometry);
    }
    let snapped = (degrees * SNAP).round() / SNAP;

    Ok(snapped.trunc().clamp(0.0, 180.0))
}

/// The three joints that define an angle.
///
/// # Example
///
/// ```
/// use yoga_align::AngleSpec;
/// use yoga_types::Joint;
///
/// let elbow = AngleSpec::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist);
/// assert_eq!(elbow.vertex, Joint::LeftElbow);
/// assert_eq!(elbow.joints(), [Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AngleSpec {
    /// First neighbor.
    pub neighbor_a: Joint,
    /// The joint the angle is measured at.
    pub vertex: Joint,
    /// Second neighbor.
    pub neighbor_b: Joint,
}

impl AngleSpec {
    /// Creates an angle spec in `(neighbor, vertex, neighbor)` order.
    #[must_use]
    pub const fn new(neighbor_a: Joint, vertex: Joint, neighbor_b: Joint) -> Self {
        Self {
            neighbor_a,
            vertex,
            neighbor_b,
        }
    }

    /// Returns the joints in `(neighbor, vertex, neighbor)` order.
    #[must_use]
    pub const fn joints(&self) -> [Joint; 3] {
        [self.neighbor_a, self.vertex, self.neighbor_b]
    }
}

/// A measured angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleMeasurement {
    /// The joint the angle is measured at.
    pub vertex: Joint,
    /// First neighbor.
    pub neighbor_a: Joint,
    /// Second neighbor.
    pub neighbor_b: Joint,
    /// Whole degrees in `[0, 180]`.
    pub degrees: f64,
}

/// Measures an angle over a skeleton's 2D projection.
///
/// Joints whose visibility is below `min_visibility` are treated as
/// unusable; pass `0.0` to accept every detected joint.
///
/// # Errors
///
/// - [`AlignError::MissingJoint`] if a referenced joint was not detected
/// - [`AlignError::NonFiniteLandmark`] if a referenced joint has a NaN or
///   infinite value
/// - [`AlignError::LowVisibility`] if a referenced joint is under the gate
/// - [`AlignError::DegenerateGeometry`] if a neighbor coincides with the vertex
pub fn measure(
    skeleton: &Skeleton,
    spec: &AngleSpec,
    min_visibility: f32,
) -> Result<AngleMeasurement> {
    let [a, b, c] = spec.joints().map(|joint| resolve(skeleton, joint, min_visibility));
    let (a, b, c) = (a?, b?, c?);

    let degrees = joint_angle(&a.position(), &b.position(), &c.position())
        .map_err(|DegenerateGeometry| AlignError::degenerate(spec.vertex))?;

    Ok(AngleMeasurement {
        vertex: spec.vertex,
        neighbor_a: spec.neighbor_a,
        neighbor_b: spec.neighbor_b,
        degrees,
    })
}

fn resolve(skeleton: &Skeleton, joint: Joint, min_visibility: f32) -> Result<LandmarkPoint> {
    let point = skeleton
        .get(joint)
        .copied()
        .ok_or(AlignError::missing_joint(joint))?;
    if !point.is_finite() {
        return Err(AlignError::non_finite(joint));
    }
    if !point.is_visible(min_visibility) {
        return Err(AlignError::low_visibility(
            joint,
            point.visibility,
            min_visibility,
        ));
    }
    Ok(point)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn right_angle() {
        assert_eq!(joint_angle(&p(0.0, 0.0), &p(0.5, 0.0), &p(0.5, 0.5)), Ok(90.0));
    }

    #[test]
    fn straight_line_is_180() {
        assert_eq!(joint_angle(&p(0.0, 0.0), &p(0.5, 0.0), &p(1.0, 0.0)), Ok(180.0));
        assert_eq!(joint_angle(&p(0.1, 0.9), &p(0.2, 0.6), &p(0.3, 0.3)), Ok(180.0));
    }

    #[test]
    fn folded_back_is_zero() {
        assert_eq!(joint_angle(&p(1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0)), Ok(0.0));
    }

    #[test]
    fn truncates_to_whole_degrees() {
        // 30 degree wedge nudged by a fraction of a degree
        let theta = 30.6_f64.to_radians();
        let c = p(theta.cos(), theta.sin());
        assert_eq!(joint_angle(&p(1.0, 0.0), &p(0.0, 0.0), &c), Ok(30.0));
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let b = p(0.3, 0.3);
        assert_eq!(joint_angle(&b, &b, &p(0.9, 0.1)), Err(DegenerateGeometry));
        assert_eq!(joint_angle(&p(0.9, 0.1), &b, &b), Err(DegenerateGeometry));
    }

    #[test]
    fn non_finite_points_are_degenerate() {
        let (a, b, c) = (p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0));
        for bad in [p(f64::NAN, 0.0), p(f64::INFINITY, 0.0), p(0.0, f64::NEG_INFINITY)] {
            assert_eq!(joint_angle(&bad, &b, &c), Err(DegenerateGeometry));
            assert_eq!(joint_angle(&a, &bad, &c), Err(DegenerateGeometry));
            assert_eq!(joint_angle(&a, &b, &bad), Err(DegenerateGeometry));
        }
    }

    #[test]
    fn measure_rejects_non_finite_landmark() {
        let skeleton = Skeleton::from_points(vec![
            LandmarkPoint::new(Joint::LeftShoulder, f32::NAN, 0.0, 1.0),
            LandmarkPoint::new(Joint::LeftElbow, 0.5, 0.0, 1.0),
            LandmarkPoint::new(Joint::LeftWrist, 0.5, 0.5, 1.0),
        ])
        .unwrap();
        let spec = AngleSpec::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist);
        assert_eq!(
            measure(&skeleton, &spec, 0.0),
            Err(AlignError::NonFiniteLandmark(Joint::LeftShoulder))
        );
    }

    #[test]
    fn measure_resolves_joints() {
        let skeleton = Skeleton::from_points(vec![
            LandmarkPoint::new(Joint::LeftShoulder, 0.0, 0.0, 1.0),
            LandmarkPoint::new(Joint::LeftElbow, 0.5, 0.0, 1.0),
            LandmarkPoint::new(Joint::LeftWrist, 0.5, 0.5, 1.0),
        ])
        .unwrap();
        let spec = AngleSpec::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist);

        let m = measure(&skeleton, &spec, 0.0).unwrap();
        assert_eq!(m.vertex, Joint::LeftElbow);
        assert_eq!(m.degrees, 90.0);
    }

    #[test]
    fn measure_ignores_depth() {
        let skeleton = Skeleton::from_points(vec![
            LandmarkPoint::new(Joint::LeftHip, 0.0, 0.0, 1.0).with_z(-3.0),
            LandmarkPoint::new(Joint::LeftKnee, 0.5, 0.0, 1.0).with_z(2.0),
            LandmarkPoint::new(Joint::LeftAnkle, 1.0, 0.0, 1.0).with_z(0.5),
        ])
        .unwrap();
        let spec = AngleSpec::new(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle);
        assert_eq!(measure(&skeleton, &spec, 0.0).unwrap().degrees, 180.0);
    }

    #[test]
    fn measure_missing_joint() {
        let skeleton =
            Skeleton::from_points(vec![LandmarkPoint::new(Joint::LeftHip, 0.0, 0.0, 1.0)])
                .unwrap();
        let spec = AngleSpec::new(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle);
        assert_eq!(
            measure(&skeleton, &spec, 0.0),
            Err(AlignError::MissingJoint(Joint::LeftKnee))
        );
    }

    #[test]
    fn measure_low_visibility() {
        let skeleton = Skeleton::from_points(vec![
            LandmarkPoint::new(Joint::LeftHip, 0.0, 0.0, 0.9),
            LandmarkPoint::new(Joint::LeftKnee, 0.5, 0.0, 0.1),
            LandmarkPoint::new(Joint::LeftAnkle, 1.0, 0.0, 0.9),
        ])
        .unwrap();
        let spec = AngleSpec::new(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle);

        assert!(matches!(
            measure(&skeleton, &spec, 0.5),
            Err(AlignError::LowVisibility {
                joint: Joint::LeftKnee,
                ..
            })
        ));
        assert!(measure(&skeleton, &spec, 0.0).is_ok());
    }

    #[test]
    fn measure_degenerate() {
        let skeleton = Skeleton::from_points(vec![
            LandmarkPoint::new(Joint::LeftShoulder, 0.4, 0.4, 1.0),
            LandmarkPoint::new(Joint::LeftElbow, 0.4, 0.4, 1.0),
            LandmarkPoint::new(Joint::LeftWrist, 0.6, 0.6, 1.0),
        ])
        .unwrap();
        let spec = AngleSpec::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist);
        assert_eq!(
            measure(&skeleton, &spec, 0.0),
            Err(AlignError::degenerate(Joint::LeftElbow))
        );
    }
}
