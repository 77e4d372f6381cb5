//! Core data types for yoga pose assessment.
//!
//! This crate provides the request-scoped values that flow through an
//! assessment:
//!
//! # Landmark Types
//!
//! - [`Joint`] - One of the 33 pose landmarks
//! - [`LandmarkPoint`] - A detected joint position with visibility
//! - [`Skeleton`] - All detected joints of one person
//!
//! # Classification Types
//!
//! - [`PoseClass`] - The closed set of recognized poses
//! - [`ClassificationResult`] - Arg-max label and probability
//! - [`InputSpec`] / [`ImageTensor`] - Classifier input geometry and data
//!
//! # Output Types
//!
//! - [`Assessment`] - Pose, confidence percentage, and feedback tips
//! - [`AssessmentResponse`] - Assessment or structured error, as sent to callers
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no model or estimator dependencies. It can
//! be used in:
//! - Inference servers
//! - CLI tools
//! - Landmark capture and replay tools
//!
//! # Example
//!
//! ```
//! use yoga_types::{Joint, LandmarkPoint, Skeleton};
//!
//! let skeleton = Skeleton::from_points(vec![
//!     LandmarkPoint::new(Joint::LeftHip, 0.5, 0.6, 0.99),
//!     LandmarkPoint::new(Joint::LeftKnee, 0.5, 0.8, 0.97),
//! ])?;
//!
//! assert!(skeleton.contains(Joint::LeftKnee));
//! # Ok::<(), yoga_types::TypesError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod assessment;
mod error;
mod frame;
mod joint;
mod landmarks;
mod pose;
mod tensor;

pub use assessment::{Assessment, AssessmentResponse, NO_PERSON_DETECTED};
pub use frame::{RGB_CHANNELS, RgbFrame};
pub use joint::Joint;
pub use landmarks::{LandmarkPoint, Skeleton};
pub use pose::{ClassificationResult, PoseClass};
pub use tensor::{ChannelOrder, ImageTensor, InputSpec};

pub use error::{Result, TypesError};
