//! Joint-angle geometry and rule-based alignment feedback.
//!
//! This crate turns a detected [`Skeleton`](yoga_types::Skeleton) into
//! natural-language corrective tips:
//!
//! - [`joint_angle`] - The angle at a vertex between two neighbors
//! - [`measure`] - The same angle resolved from a skeleton
//! - [`AlignmentRule`] - A declarative threshold check with a tip
//! - [`AlignmentEngine`] - Evaluates an ordered rule table
//!
//! # Rule Semantics
//!
//! Rules are evaluated in declaration order and their tips are returned in
//! that order. A rule whose joints are missing, under the visibility gate,
//! or coincident is skipped; it never fails the evaluation. When no rule
//! fires the engine returns [`PERFECT_ALIGNMENT_TIP`] alone, so feedback
//! is never empty.
//!
//! The shipped [`DEFAULT_RULES`] measure the left side of the body only.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate: pure geometry with no model dependencies.
//!
//! # Example
//!
//! ```
//! use yoga_align::AlignmentEngine;
//! use yoga_types::{Joint, LandmarkPoint, Skeleton};
//!
//! // Arm bent to a right angle; legs and back not detected.
//! let skeleton = Skeleton::from_points(vec![
//!     LandmarkPoint::new(Joint::LeftShoulder, 0.4, 0.3, 0.99),
//!     LandmarkPoint::new(Joint::LeftElbow, 0.6, 0.3, 0.99),
//!     LandmarkPoint::new(Joint::LeftWrist, 0.6, 0.5, 0.99),
//! ])?;
//!
//! let tips = AlignmentEngine::new().evaluate(&skeleton);
//! assert_eq!(tips, vec!["Straighten your arms."]);
//! # Ok::<(), yoga_types::TypesError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod angle;
mod engine;
mod error;
mod rule;

pub use angle::{AngleMeasurement, AngleSpec, DegenerateGeometry, joint_angle, measure};
pub use engine::{AlignmentEngine, Evaluation, RuleOutcome};
pub use error::{AlignError, Result};
pub use rule::{
    AlignmentRule, BACK_RULE, Comparator, DEFAULT_RULES, ELBOW_RULE, KNEE_RULE,
    PERFECT_ALIGNMENT_TIP,
};
