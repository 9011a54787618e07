use crate::error::OcrError;
use image::DynamicImage;

/// The server number always renders in the upper-left of the interface,
/// so only the left half and top third of the frame are kept. Cropping
/// away the rest removes unrelated UI numbers before they ever reach
/// the engine.
pub const ROI_WIDTH_FACTOR: u32 = 2;
pub const ROI_HEIGHT_FACTOR: u32 = 3;

/// Crop to the region of interest anchored at the origin.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let width = image.width() / ROI_WIDTH_FACTOR;
    let height = image.height() / ROI_HEIGHT_FACTOR;

    if width == 0 || height == 0 {
        return Err(OcrError::InvalidInput(format!(
            "image too small for region of interest: {}x{}",
            image.width(),
            image.height()
        )));
    }

    Ok(image.crop_imm(0, 0, width, height))
}
