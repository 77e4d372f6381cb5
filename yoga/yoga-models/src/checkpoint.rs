//! Checkpoint persistence for classifier weights.
//!
//! Training happens offline; the serving side only needs to load what the
//! training job wrote. Saving is kept so tools and tests can produce
//! checkpoints in the same formats.

use std::path::{Path, PathBuf};

use burn::module::Module;
use burn::prelude::Backend;
use burn::record::{BinFileRecorder, FullPrecisionSettings, PrettyJsonFileRecorder, Recorder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ModelError, Result};

/// Supported checkpoint file formats.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use yoga_models::CheckpointFormat;
///
/// let format = CheckpointFormat::from_path(Path::new("models/yoga_classifier.bin"));
/// assert_eq!(format, Some(CheckpointFormat::Binary));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointFormat {
    /// Binary format, compact and fast.
    ///
    /// Uses Burn's `BinFileRecorder` with full precision.
    #[default]
    Binary,

    /// JSON format, human-readable.
    ///
    /// Uses Burn's `PrettyJsonFileRecorder`. Larger, but easy to inspect.
    Json,
}

impl CheckpointFormat {
    /// Determines format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "bin" => Some(Self::Binary),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Determines format from a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Binary => "bin",
            Self::Json => "json",
        }
    }

    /// Returns the format name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for CheckpointFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Saves model weights.
///
/// `path` is given without extension; the format's extension is appended.
/// Returns the path that was written.
///
/// # Errors
///
/// Returns [`ModelError::SaveCheckpoint`] if writing fails.
pub fn save_checkpoint<B, M>(model: &M, path: &Path, format: CheckpointFormat) -> Result<PathBuf>
where
    B: Backend,
    M: Module<B>,
{
    let full_path = path.with_extension(format.extension());
    let record = model.clone().into_record();
    let shown = full_path.display().to_string();

    match format {
        CheckpointFormat::Binary => BinFileRecorder::<FullPrecisionSettings>::new()
            .record(record, full_path.clone())
            .map_err(|e| ModelError::save_checkpoint(&shown, e.to_string()))?,
        CheckpointFormat::Json => PrettyJsonFileRecorder::<FullPrecisionSettings>::new()
            .record(record, full_path.clone())
            .map_err(|e| ModelError::save_checkpoint(&shown, e.to_string()))?,
    }

    debug!(path = %shown, %format, "saved checkpoint");
    Ok(full_path)
}

/// Loads weights from a checkpoint into `model`.
///
/// The format is chosen from the file extension.
///
/// # Errors
///
/// - [`ModelError::CheckpointNotFound`] if the file does not exist
/// - [`ModelError::UnsupportedFormat`] if the extension is not recognized
/// - [`ModelError::LoadCheckpoint`] if the weights cannot be read, for
///   example because they were saved for a different architecture
pub fn load_checkpoint<B, M>(model: M, path: &Path, device: &B::Device) -> Result<M>
where
    B: Backend,
    M: Module<B>,
{
    let shown = path.display().to_string();

    if !path.exists() {
        return Err(ModelError::checkpoint_not_found(shown));
    }

    let format =
        CheckpointFormat::from_path(path).ok_or_else(|| ModelError::unsupported_format(&shown))?;

    let loaded = match format {
        CheckpointFormat::Binary => {
            let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
            model
                .load_file(path.to_path_buf(), &recorder, device)
                .map_err(|e| ModelError::load_checkpoint(&shown, e.to_string()))?
        }
        CheckpointFormat::Json => {
            let recorder = PrettyJsonFileRecorder::<FullPrecisionSettings>::new();
            model
                .load_file(path.to_path_buf(), &recorder, device)
                .map_err(|e| ModelError::load_checkpoint(&shown, e.to_string()))?
        }
    };

    Ok(loaded)
}
