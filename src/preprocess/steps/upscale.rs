use crate::error::OcrError;
use image::imageops::FilterType;
use image::DynamicImage;

/// Upscale factor applied after binarization. Banner glyphs are small
/// at native resolution; the engine needs more pixels per glyph to
/// segment them reliably.
const SCALE_FACTOR: f32 = 2.0;

/// Upscale with smooth cubic interpolation.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let width = (image.width() as f32 * SCALE_FACTOR) as u32;
    let height = (image.height() as f32 * SCALE_FACTOR) as u32;
    Ok(image.resize_exact(width, height, FilterType::CatmullRom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn doubles_both_dimensions() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(40, 30));
        let result = apply(img).unwrap();
        assert_eq!((result.width(), result.height()), (80, 60));
    }

    #[test]
    fn handles_odd_dimensions() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(33, 11));
        let result = apply(img).unwrap();
        assert_eq!((result.width(), result.height()), (66, 22));
    }
}
