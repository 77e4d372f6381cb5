//! Normalized image tensors and the input geometry a classifier requires.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypesError};
use crate::frame::RGB_CHANNELS;

/// Channel order of a three-channel tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Blue, green, red (`OpenCV` convention).
    Bgr,
}

impl ChannelOrder {
    /// Returns the order name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Bgr => "bgr",
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The tensor geometry a classifier accepts.
///
/// Tensors are HWC `f32` with three channels and values in `[0, 1]`.
///
/// # Example
///
/// ```
/// use yoga_types::{ChannelOrder, InputSpec};
///
/// let spec = InputSpec::default();
/// assert_eq!((spec.width, spec.height), (224, 224));
/// assert_eq!(spec.channel_order, ChannelOrder::Rgb);
/// assert_eq!(spec.element_count(), 224 * 224 * 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSpec {
    /// Required width in pixels.
    pub width: u32,
    /// Required height in pixels.
    pub height: u32,
    /// Required channel order.
    #[serde(default)]
    pub channel_order: ChannelOrder,
}

impl InputSpec {
    /// Creates a square RGB input spec.
    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
            channel_order: ChannelOrder::Rgb,
        }
    }

    /// Sets the channel order.
    #[must_use]
    pub const fn with_channel_order(mut self, channel_order: ChannelOrder) -> Self {
        self.channel_order = channel_order;
        self
    }

    /// Number of `f32` elements in a matching tensor.
    #[must_use]
    pub const fn element_count(&self) -> usize {
        self.width as usize * self.height as usize * RGB_CHANNELS
    }

    /// Returns `true` if both dimensions are positive.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns `true` if the tensor has exactly this geometry.
    #[must_use]
    pub fn matches(&self, tensor: &ImageTensor) -> bool {
        tensor.width == self.width
            && tensor.height == self.height
            && tensor.channel_order == self.channel_order
    }
}

impl Default for InputSpec {
    fn default() -> Self {
        Self::square(224)
    }
}

impl fmt::Display for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x3 {}", self.height, self.width, self.channel_order)
    }
}

/// A normalized HWC image tensor with values in `[0, 1]`.
///
/// # Example
///
/// ```
/// use yoga_types::{ChannelOrder, ImageTensor};
///
/// let tensor = ImageTensor::new(2, 1, ChannelOrder::Rgb, vec![0.0, 0.5, 1.0, 1.0, 0.5, 0.0])?;
/// assert_eq!(tensor.shape(), [1, 2, 3]);
/// # Ok::<(), yoga_types::TypesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TensorParts")]
pub struct ImageTensor {
    width: u32,
    height: u32,
    channel_order: ChannelOrder,
    data: Vec<f32>,
}

impl ImageTensor {
    /// Creates a tensor.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidDimensions`] for a zero-sized tensor and
    /// [`TypesError::DataSizeMismatch`] if `data` does not hold
    /// `width * height * 3` elements.
    pub fn new(
        width: u32,
        height: u32,
        channel_order: ChannelOrder,
        data: Vec<f32>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TypesError::invalid_dimensions(width, height));
        }
        let expected = width as usize * height as usize * RGB_CHANNELS;
        if data.len() != expected {
            return Err(TypesError::data_size_mismatch(expected, data.len()));
        }
        Ok(Self {
            width,
            height,
            channel_order,
            data,
        })
    }

    /// Creates a zero tensor matching an input spec.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidDimensions`] if the spec is invalid.
    pub fn zeros(spec: InputSpec) -> Result<Self> {
        Self::new(
            spec.width,
            spec.height,
            spec.channel_order,
            vec![0.0; spec.element_count()],
        )
    }

    /// Returns the width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the channel order.
    #[must_use]
    pub const fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Returns the shape as `[height, width, channels]`.
    #[must_use]
    pub const fn shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, RGB_CHANNELS]
    }

    /// Returns the raw values.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns `true` if every value is finite and within `[0, 1]`.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.data.iter().all(|v| (0.0..=1.0).contains(v))
    }

    /// Describes the geometry for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}x{}x3 {}", self.height, self.width, self.channel_order)
    }
}

/// Unchecked wire form of [`ImageTensor`]; decoding goes through
/// [`ImageTensor::new`].
#[derive(Deserialize)]
struct TensorParts {
    width: u32,
    height: u32,
    channel_order: ChannelOrder,
    data: Vec<f32>,
}

impl TryFrom<TensorParts> for ImageTensor {
    type Error = TypesError;

    fn try_from(parts: TensorParts) -> Result<Self> {
        Self::new(parts.width, parts.height, parts.channel_order, parts.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn spec_default() {
        let spec = InputSpec::default();
        assert_eq!(spec, InputSpec::square(224));
        assert!(spec.is_valid());
        assert_eq!(spec.to_string(), "224x224x3 rgb");
    }

    #[test]
    fn spec_matches_tensor() {
        let spec = InputSpec::square(2);
        let tensor = ImageTensor::zeros(spec).unwrap();
        assert!(spec.matches(&tensor));
        assert!(!InputSpec::square(3).matches(&tensor));
        assert!(!spec.with_channel_order(ChannelOrder::Bgr).matches(&tensor));
    }

    #[test]
    fn spec_defaults_channel_order() {
        let spec: InputSpec = serde_json::from_str(r#"{"width": 128, "height": 128}"#).unwrap();
        assert_eq!(spec.channel_order, ChannelOrder::Rgb);
    }

    #[test]
    fn tensor_rejects_bad_length() {
        let err = ImageTensor::new(2, 2, ChannelOrder::Rgb, vec![0.0; 11]).unwrap_err();
        assert!(matches!(
            err,
            TypesError::DataSizeMismatch {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn tensor_normalized_check() {
        let ok = ImageTensor::new(1, 1, ChannelOrder::Rgb, vec![0.0, 0.5, 1.0]).unwrap();
        assert!(ok.is_normalized());

        let bad = ImageTensor::new(1, 1, ChannelOrder::Rgb, vec![0.0, 255.0, 1.0]).unwrap();
        assert!(!bad.is_normalized());

        let nan = ImageTensor::new(1, 1, ChannelOrder::Rgb, vec![f32::NAN, 0.0, 0.0]).unwrap();
        assert!(!nan.is_normalized());
    }

    #[test]
    fn tensor_describe() {
        let tensor = ImageTensor::zeros(InputSpec::square(4).with_channel_order(ChannelOrder::Bgr))
            .unwrap();
        assert_eq!(tensor.describe(), "4x4x3 bgr");
        assert_eq!(tensor.shape(), [4, 4, 3]);
    }

    #[test]
    fn tensor_json_is_length_checked() {
        let short = r#"{"width": 2, "height": 2, "channel_order": "rgb", "data": [0.0, 0.5, 1.0]}"#;
        assert!(serde_json::from_str::<ImageTensor>(short).is_err());

        let tensor = ImageTensor::new(1, 1, ChannelOrder::Bgr, vec![0.25, 0.5, 0.75]).unwrap();
        let json = serde_json::to_string(&tensor).unwrap();
        assert_eq!(serde_json::from_str::<ImageTensor>(&json).unwrap(), tensor);
    }
}
