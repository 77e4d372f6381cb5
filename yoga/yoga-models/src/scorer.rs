//! [`ScoreModel`] backed by the Burn reference network.

use std::path::Path;
use std::sync::Mutex;

use burn::prelude::Backend;
use burn::tensor::{Tensor, TensorData};
use tracing::{debug, info};
use yoga_types::{ImageTensor, InputSpec};

use crate::adapter::ScoreModel;
use crate::checkpoint::load_checkpoint;
use crate::classifier::{PoseClassifierConfig, PoseClassifierNet};
use crate::error::{ModelError, Result};

/// Runs [`PoseClassifierNet`] on single images.
///
/// Burn modules are not `Sync`, so the network sits behind a mutex and
/// concurrent calls are serialized.
///
/// # Example
///
/// ```ignore
/// use yoga_models::{BurnScoreModel, ClassificationAdapter, PoseClassifierConfig};
///
/// let device = Default::default();
/// let model = BurnScoreModel::<MyBackend>::from_checkpoint(
///     PoseClassifierConfig::default(),
///     "models/yoga_classifier.bin",
///     &device,
/// )?;
/// let classifier = ClassificationAdapter::new(model);
/// ```
#[derive(Debug)]
pub struct BurnScoreModel<B: Backend> {
    net: Mutex<PoseClassifierNet<B>>,
    config: PoseClassifierConfig,
    device: B::Device,
}

impl<B: Backend> BurnScoreModel<B> {
    /// Wraps an already built network.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfig`] if the configuration is invalid.
    pub fn new(
        net: PoseClassifierNet<B>,
        config: PoseClassifierConfig,
        device: B::Device,
    ) -> Result<Self> {
        validate(&config)?;
        Ok(Self {
            net: Mutex::new(net),
            config,
            device,
        })
    }

    /// Builds a network with freshly initialized weights.
    ///
    /// Useful for wiring tests; predictions are meaningless until trained
    /// weights are loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfig`] if the configuration is invalid.
    pub fn untrained(config: PoseClassifierConfig, device: &B::Device) -> Result<Self> {
        validate(&config)?;
        Self::new(PoseClassifierNet::new(config, device), config, device.clone())
    }

    /// Builds a network and loads trained weights from a checkpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfig`] for an invalid configuration
    /// and the [`load_checkpoint`] errors otherwise.
    pub fn from_checkpoint(
        config: PoseClassifierConfig,
        path: impl AsRef<Path>,
        device: &B::Device,
    ) -> Result<Self> {
        let path = path.as_ref();
        validate(&config)?;
        let net = load_checkpoint(PoseClassifierNet::new(config, device), path, device)?;
        info!(
            path = %path.display(),
            input = %config.input,
            hidden = config.hidden,
            "loaded pose classifier"
        );
        Self::new(net, config, device.clone())
    }

    /// Returns the network configuration.
    #[must_use]
    pub const fn config(&self) -> &PoseClassifierConfig {
        &self.config
    }
}

fn validate(config: &PoseClassifierConfig) -> Result<()> {
    if config.is_valid() {
        return Ok(());
    }
    Err(ModelError::invalid_config(format!(
        "hidden={} input={} classes={}",
        config.hidden, config.input, config.num_classes
    )))
}

impl<B: Backend> ScoreModel for BurnScoreModel<B> {
    fn input_spec(&self) -> InputSpec {
        self.config.input
    }

    fn scores(&self, tensor: &ImageTensor) -> Result<Vec<f32>> {
        let spec = self.input_spec();
        if !spec.matches(tensor) {
            return Err(ModelError::invalid_input_shape(
                spec.to_string(),
                tensor.describe(),
            ));
        }

        let input = Tensor::<B, 2>::from_data(
            TensorData::new(tensor.as_slice().to_vec(), [1, self.config.input_dim()]),
            &self.device,
        );

        let probs = {
            let net = self
                .net
                .lock()
                .map_err(|e| ModelError::unavailable(e.to_string()))?;
            net.predict(input)
        };

        let scores = probs
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| ModelError::inference(format!("{e:?}")))?;
        debug!(classes = scores.len(), "scored image");
        Ok(scores)
    }
}
