//! Yoga pose assessment orchestration.
//!
//! This crate fuses the two halves of an assessment into one verdict:
//! body-joint geometry from a landmark estimator, turned into alignment
//! tips, and a pose label from an image classifier.
//!
//! # Pipeline
//!
//! [`Assessor::assess`] runs, per frame:
//!
//! 1. **Extract** - [`LandmarkEstimator::extract`]; nobody in frame ends the
//!    request with [`AssessError::NoPersonDetected`] and the classifier is
//!    never called
//! 2. **Analyze** - [`AlignmentEngine::evaluate`](yoga_align::AlignmentEngine::evaluate)
//!    on the skeleton
//! 3. **Classify** - [`normalize`] the frame to the classifier's input spec
//!    and call [`PoseClassifier::classify`](yoga_models::PoseClassifier::classify)
//! 4. **Assemble** - confidence as a percentage with two decimals
//!
//! [`Assessor::respond`] wraps this for callers: nobody in frame becomes
//! `{"error": "No person detected"}`, everything else that fails is a hard
//! error.
//!
//! # Collaborators
//!
//! Estimator and classifier are injected at construction. Both traits
//! require `Send + Sync`; a collaborator that needs `&mut self` implements
//! [`LandmarkEstimatorMut`] or [`PoseClassifierMut`] and is shared through
//! [`Exclusive`], which serializes calls with a mutex.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate. It holds no global state and runs no estimator
//! of its own; callers supply both collaborators, so it works the same in
//! a server, a CLI, or a test harness.
//!
//! # Example
//!
//! ```
//! use yoga_assess::{Assessor, ReplayEstimator};
//! use yoga_models::{ClassificationAdapter, ScoreModel};
//! use yoga_types::{ImageTensor, InputSpec, Joint, LandmarkPoint, PoseClass, RgbFrame, Skeleton};
//!
//! struct Fixed;
//!
//! impl ScoreModel for Fixed {
//!     fn input_spec(&self) -> InputSpec {
//!         InputSpec::square(16)
//!     }
//!
//!     fn scores(&self, _: &ImageTensor) -> yoga_models::Result<Vec<f32>> {
//!         Ok(vec![0.9, 0.025, 0.025, 0.025, 0.025])
//!     }
//! }
//!
//! let skeleton = Skeleton::from_points(vec![
//!     LandmarkPoint::new(Joint::LeftShoulder, 0.4, 0.3, 0.99),
//!     LandmarkPoint::new(Joint::LeftElbow, 0.6, 0.3, 0.99),
//!     LandmarkPoint::new(Joint::LeftWrist, 0.6, 0.5, 0.99),
//! ])?;
//!
//! let assessor = Assessor::new(
//!     ReplayEstimator::detected(skeleton),
//!     ClassificationAdapter::new(Fixed),
//! );
//!
//! let assessment = assessor.assess(&RgbFrame::filled(64, 48, [90, 90, 90])?)?;
//! assert_eq!(assessment.pose, PoseClass::Warrior);
//! assert_eq!(assessment.feedback, vec!["Straighten your arms."]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod assessor;
mod config;
mod error;
mod estimator;
mod exclusive;
mod normalize;

pub use assessor::Assessor;
pub use config::{AssessorConfig, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MODEL_PATH};
pub use error::{AssessError, Result};
pub use estimator::{LandmarkEstimator, LandmarkEstimatorMut, ReplayEstimator};
pub use exclusive::{Exclusive, PoseClassifierMut};
pub use normalize::normalize;
