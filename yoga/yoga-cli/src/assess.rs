//! The `assess` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use burn_ndarray::{NdArray, NdArrayDevice};
use tracing::warn;
use yoga_assess::{Assessor, AssessorConfig, ReplayEstimator};
use yoga_models::{BurnScoreModel, ClassificationAdapter};
use yoga_types::RgbFrame;

type Backend = NdArray<f32>;

/// Arguments for [`run`].
pub struct AssessArgs {
    pub image: PathBuf,
    pub landmarks: PathBuf,
    pub config: Option<PathBuf>,
    pub checkpoint: Option<PathBuf>,
    pub untrained: bool,
}

/// Assesses one frame and prints the response as JSON.
pub fn run(args: &AssessArgs) -> Result<()> {
    let (config, base) = load_config(args.config.as_deref())?;
    let frame = load_frame(&args.image)?;
    let estimator = ReplayEstimator::load(&args.landmarks)
        .with_context(|| format!("reading landmarks from {}", args.landmarks.display()))?;

    let device = NdArrayDevice::default();
    let model = if args.untrained {
        warn!("untrained weights, pose labels are meaningless");
        BurnScoreModel::<Backend>::untrained(config.classifier(), &device)?
    } else {
        let path = args
            .checkpoint
            .clone()
            .unwrap_or_else(|| config.resolve_model_path(&base));
        BurnScoreModel::<Backend>::from_checkpoint(config.classifier(), &path, &device)
            .with_context(|| format!("loading classifier from {}", path.display()))?
    };

    let assessor = Assessor::new(estimator, ClassificationAdapter::new(model))
        .with_engine(config.engine())
        .with_confidence_threshold(config.confidence_threshold);
    let response = assessor
        .respond(&frame)
        .with_context(|| format!("assessing {}", args.image.display()))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Loads the configuration and the directory its relative paths hang off.
fn load_config(path: Option<&Path>) -> Result<(AssessorConfig, PathBuf)> {
    let Some(path) = path else {
        return Ok((AssessorConfig::default(), PathBuf::from(".")));
    };

    let config = AssessorConfig::load(path)?;
    let base = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((config, base))
}

fn load_frame(path: &Path) -> Result<RgbFrame> {
    let image = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgb8();
    let (width, height) = image.dimensions();
    Ok(RgbFrame::new(width, height, image.into_raw())?)
}
