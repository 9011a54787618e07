use crate::error::OcrError;
use image::DynamicImage;

/// Bitwise complement. The interface draws light digits on a dark
/// backdrop; recognition wants dark-on-light input.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let mut img = image;
    img.invert();
    Ok(img)
}
