//! Frame to classifier tensor conversion.

use image::RgbImage;
use image::imageops::{self, FilterType};
use yoga_types::{ChannelOrder, ImageTensor, InputSpec, RgbFrame, TypesError};

use crate::error::Result;

/// Converts a decoded frame into the tensor a classifier expects.
///
/// The frame is resized with bilinear filtering to the spec's dimensions
/// (skipped when they already match), reordered to the spec's channel
/// order, and scaled from `0..=255` to `[0, 1]`.
///
/// # Errors
///
/// Returns [`AssessError::Types`](crate::AssessError::Types) if the spec has a
/// zero dimension.
///
/// # Example
///
/// ```
/// use yoga_assess::normalize;
/// use yoga_types::{InputSpec, RgbFrame};
///
/// let frame = RgbFrame::filled(640, 480, [255, 0, 51])?;
/// let tensor = normalize(&frame, &InputSpec::square(224))?;
///
/// assert_eq!(tensor.shape(), [224, 224, 3]);
/// assert!(tensor.is_normalized());
/// assert_eq!(&tensor.as_slice()[..3], &[1.0, 0.0, 0.2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn normalize(frame: &RgbFrame, spec: &InputSpec) -> Result<ImageTensor> {
    if !spec.is_valid() {
        return Err(TypesError::invalid_dimensions(spec.width, spec.height).into());
    }

    let image = RgbImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
        .ok_or_else(|| {
            TypesError::data_size_mismatch(
                RgbFrame::buffer_size(frame.width(), frame.height()),
                frame.as_bytes().len(),
            )
        })?;

    let resized = if image.dimensions() == (spec.width, spec.height) {
        image
    } else {
        imageops::resize(&image, spec.width, spec.height, FilterType::Triangle)
    };

    let mut data = Vec::with_capacity(spec.element_count());
    for pixel in resized.pixels() {
        let [r, g, b] = pixel.0;
        let ordered = match spec.channel_order {
            ChannelOrder::Rgb => [r, g, b],
            ChannelOrder::Bgr => [b, g, r],
        };
        data.extend(ordered.map(|c| f32::from(c) / 255.0));
    }

    Ok(ImageTensor::new(
        spec.width,
        spec.height,
        spec.channel_order,
        data,
    )?)
}
