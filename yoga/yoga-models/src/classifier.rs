//! Reference pose classification network.

use burn::module::Module;
use burn::nn;
use burn::prelude::Backend;
use burn::tensor::Tensor;
use burn::tensor::activation::{relu, softmax};
use serde::{Deserialize, Serialize};
use yoga_types::{InputSpec, PoseClass};

/// Configuration for the pose classifier network.
///
/// # Example
///
/// ```
/// use yoga_models::PoseClassifierConfig;
/// use yoga_types::InputSpec;
///
/// let config = PoseClassifierConfig::default();
/// assert_eq!(config.hidden, 64);
/// assert_eq!(config.input, InputSpec::square(224));
/// assert_eq!(config.input_dim(), 224 * 224 * 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseClassifierConfig {
    /// Number of hidden units.
    pub hidden: usize,

    /// Input image geometry.
    pub input: InputSpec,

    /// Number of output classes (default: one per [`PoseClass`]).
    pub num_classes: usize,
}

impl Default for PoseClassifierConfig {
    fn default() -> Self {
        Self::new(64)
    }
}

impl PoseClassifierConfig {
    /// Creates a new configuration with custom hidden size.
    #[must_use]
    pub const fn new(hidden: usize) -> Self {
        Self {
            hidden,
            input: InputSpec::square(224),
            num_classes: PoseClass::COUNT,
        }
    }

    /// Sets the input geometry.
    #[must_use]
    pub const fn with_input(mut self, input: InputSpec) -> Self {
        self.input = input;
        self
    }

    /// Flattened input length.
    #[must_use]
    pub const fn input_dim(&self) -> usize {
        self.input.element_count()
    }

    /// Validates the configuration.
    ///
    /// Returns `true` if all dimensions are positive and the output layer
    /// has one unit per pose class.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.hidden > 0 && self.input.is_valid() && self.num_classes == PoseClass::COUNT
    }
}

/// A small feedforward pose classifier.
///
/// Architecture: Flatten -> Linear -> `ReLU` -> Linear -> Softmax
///
/// The input is a batch of HWC images flattened to
/// `[batch_size, height * width * 3]`.
///
/// # Type Parameters
///
/// - `B`: The Burn backend (e.g., `NdArray`)
#[derive(Debug, Module)]
pub struct PoseClassifierNet<B: Backend> {
    linear1: nn::Linear<B>,
    linear2: nn::Linear<B>,
}

impl<B: Backend> PoseClassifierNet<B> {
    /// Creates a new network with freshly initialized weights.
    #[must_use]
    pub fn new(config: PoseClassifierConfig, device: &B::Device) -> Self {
        let linear1 = nn::LinearConfig::new(config.input_dim(), config.hidden).init(device);
        let linear2 = nn::LinearConfig::new(config.hidden, config.num_classes).init(device);
        Self { linear1, linear2 }
    }

    /// Runs the forward pass.
    ///
    /// # Arguments
    ///
    /// - `input`: Input tensor of shape `[batch_size, input_dim]`
    ///
    /// # Returns
    ///
    /// Logits of shape `[batch_size, num_classes]`.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.linear1.forward(input);
        let x = relu(x);
        self.linear2.forward(x)
    }

    /// Runs the forward pass and normalizes each row to probabilities.
    pub fn predict(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.forward(input), 1)
    }
}
