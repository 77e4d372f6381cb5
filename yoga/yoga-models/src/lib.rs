//! Pose classification for yoga pose assessment.
//!
//! This crate defines the call contract between the assessment pipeline
//! and a pretrained image classifier, plus a Burn reference network that
//! satisfies it.
//!
//! # Classification Contract
//!
//! - [`ScoreModel`] - Any model mapping a normalized image to one
//!   probability per pose class
//! - [`ClassificationAdapter`] - Enforces the model's [`InputSpec`] and
//!   reduces scores to an arg-max [`ClassificationResult`]
//! - [`PoseClassifier`] - The narrow interface the orchestrator depends on
//!
//! A tensor whose geometry differs from the model's input spec is rejected
//! with [`ModelError::InvalidInputShape`]. The adapter never resizes.
//!
//! # Reference Network
//!
//! - [`PoseClassifierNet`] - Flatten, two linear layers, softmax
//! - [`BurnScoreModel`] - Runs the network on one image at a time
//!
//! # Checkpoint Persistence
//!
//! Weights are loaded with Burn's recorders:
//! - Binary format (compact, fast)
//! - JSON format (human-readable, debuggable)
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate. It depends on Burn but not on any estimator,
//! and can be used in inference servers and CLI tools.
//!
//! # Backend Support
//!
//! The network is generic over Burn backends. `burn-ndarray` is the CPU
//! backend used by the CLI and the tests.
//!
//! [`InputSpec`]: yoga_types::InputSpec
//! [`ClassificationResult`]: yoga_types::ClassificationResult

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adapter;
mod checkpoint;
mod classifier;
mod error;
mod scorer;

// Re-export the classification contract
pub use adapter::{ClassificationAdapter, PoseClassifier, ScoreModel};

// Re-export model types
pub use classifier::{PoseClassifierConfig, PoseClassifierNet};
pub use scorer::BurnScoreModel;

// Re-export checkpoint utilities
pub use checkpoint::{CheckpointFormat, load_checkpoint, save_checkpoint};

// Re-export error types
pub use error::{ModelError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        BurnScoreModel, CheckpointFormat, ClassificationAdapter, ModelError, PoseClassifier,
        PoseClassifierConfig, PoseClassifierNet, ScoreModel, load_checkpoint, save_checkpoint,
    };
}
