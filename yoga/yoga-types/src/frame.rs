//! Decoded RGB image handed to the assessment pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypesError};

/// Bytes per RGB8 pixel.
pub const RGB_CHANNELS: usize = 3;

/// A decoded RGB8 image, row-major, interleaved.
///
/// Decoding from an encoded format happens upstream; this type only
/// guarantees that the buffer matches the stated dimensions.
///
/// # Example
///
/// ```
/// use yoga_types::RgbFrame;
///
/// let frame = RgbFrame::new(640, 480, vec![0u8; 640 * 480 * 3])?;
/// assert_eq!((frame.width(), frame.height()), (640, 480));
/// assert_eq!(frame.as_bytes().len(), RgbFrame::buffer_size(640, 480));
/// # Ok::<(), yoga_types::TypesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FrameParts")]
pub struct RgbFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbFrame {
    /// Creates a frame from raw RGB8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidDimensions`] for a zero-sized image and
    /// [`TypesError::DataSizeMismatch`] if `data` is not
    /// `width * height * 3` bytes long.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TypesError::invalid_dimensions(width, height));
        }
        let expected = Self::buffer_size(width, height);
        if data.len() != expected {
            return Err(TypesError::data_size_mismatch(expected, data.len()));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a frame filled with one color.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidDimensions`] for a zero-sized image.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        let pixels = Self::buffer_size(width, height) / RGB_CHANNELS;
        Self::new(width, height, rgb.repeat(pixels))
    }

    /// Expected buffer length for an RGB8 image.
    #[must_use]
    pub const fn buffer_size(width: u32, height: u32) -> usize {
        width as usize * height as usize * RGB_CHANNELS
    }

    /// Returns the image width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raw RGB8 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Deserialize)]
struct FrameParts {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl TryFrom<FrameParts> for RgbFrame {
    type Error = TypesError;

    fn try_from(parts: FrameParts) -> Result<Self> {
        Self::new(parts.width, parts.height, parts.data)
    }
}
