use crate::error::OcrError;
use image::DynamicImage;

/// Collapse to a single luminance channel. Later steps operate on
/// grayscale only.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    Ok(DynamicImage::ImageLuma8(image.to_luma8()))
}
