//! Deployment configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use yoga_align::AlignmentEngine;
use yoga_models::PoseClassifierConfig;
use yoga_types::InputSpec;

use crate::error::{AssessError, Result};

/// Default classifier checkpoint, relative to the configuration file.
pub const DEFAULT_MODEL_PATH: &str = "models/yoga_classifier.bin";

/// Classifier confidence at which a pose counts as held.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Configuration for an assessment deployment.
///
/// Stored as TOML. Every field has a default, so an empty file is valid.
///
/// # Example
///
/// ```
/// use yoga_assess::AssessorConfig;
///
/// let config: AssessorConfig = toml::from_str(
///     r#"
///     model_path = "weights/pose.bin"
///     confidence_threshold = 0.8
///
///     [input]
///     width = 128
///     height = 128
///     "#,
/// )?;
///
/// assert_eq!(config.input.width, 128);
/// assert_eq!(config.hidden, 64);
/// assert!(config.is_valid());
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessorConfig {
    /// Classifier checkpoint. Relative paths are resolved against the
    /// directory holding the configuration file.
    pub model_path: PathBuf,

    /// Classifier input geometry.
    pub input: InputSpec,

    /// Hidden width of the reference classifier network.
    pub hidden: usize,

    /// Minimum joint visibility for an alignment rule to be evaluated.
    /// `0.0` evaluates every detected joint.
    pub min_visibility: f32,

    /// Classifier confidence at which a pose counts as held.
    pub confidence_threshold: f64,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            input: InputSpec::default(),
            hidden: 64,
            min_visibility: 0.0,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl AssessorConfig {
    /// Sets the checkpoint path.
    #[must_use]
    pub fn with_model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = model_path.into();
        self
    }

    /// Sets the classifier input geometry.
    #[must_use]
    pub const fn with_input(mut self, input: InputSpec) -> Self {
        self.input = input;
        self
    }

    /// Sets the hidden width.
    #[must_use]
    pub const fn with_hidden(mut self, hidden: usize) -> Self {
        self.hidden = hidden;
        self
    }

    /// Sets the visibility gate.
    #[must_use]
    pub const fn with_min_visibility(mut self, min_visibility: f32) -> Self {
        self.min_visibility = min_visibility;
        self
    }

    /// Sets the confidence threshold.
    #[must_use]
    pub const fn with_confidence_threshold(mut self, confidence_threshold: f64) -> Self {
        self.confidence_threshold = confidence_threshold;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `true` if the input geometry and hidden width are positive
    /// and both thresholds are probabilities.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.input.is_valid()
            && self.hidden > 0
            && (0.0..=1.0).contains(&self.min_visibility)
            && (0.0..=1.0).contains(&self.confidence_threshold)
    }

    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Config`] if the file cannot be read, is not
    /// valid TOML, or fails [`is_valid`](Self::is_valid).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let text =
            std::fs::read_to_string(path).map_err(|e| AssessError::config(&shown, e.to_string()))?;
        let config: Self =
            toml::from_str(&text).map_err(|e| AssessError::config(&shown, e.to_string()))?;

        if !config.is_valid() {
            return Err(AssessError::config(&shown, "values out of range"));
        }
        Ok(config)
    }

    /// Writes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`AssessError::Config`] if serialization or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let text =
            toml::to_string_pretty(self).map_err(|e| AssessError::config(&shown, e.to_string()))?;
        std::fs::write(path, text).map_err(|e| AssessError::config(&shown, e.to_string()))
    }

    /// Resolves the checkpoint path against a base directory.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn resolve_model_path(&self, base: &Path) -> PathBuf {
        if self.model_path.is_absolute() {
            self.model_path.clone()
        } else {
            base.join(&self.model_path)
        }
    }

    /// Builds the alignment engine for this deployment.
    #[must_use]
    pub const fn engine(&self) -> AlignmentEngine {
        AlignmentEngine::new().with_min_visibility(self.min_visibility)
    }

    /// Builds the reference classifier configuration.
    #[must_use]
    pub const fn classifier(&self) -> PoseClassifierConfig {
        PoseClassifierConfig::new(self.hidden).with_input(self.input)
    }
}
