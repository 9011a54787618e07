use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Neighbourhood size for the local threshold. Must be odd.
const BLOCK_SIZE: u32 = 11;
/// Subtracted from the neighbourhood mean before comparing.
const MEAN_OFFSET: f64 = 2.0;

/// Binarize with a locally computed threshold.
///
/// The banner background has uneven brightness, so a single global
/// cutoff misclassifies whole regions; each pixel is compared against
/// the mean of its own neighbourhood instead.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let binarized = adaptive_mean_threshold(&gray, BLOCK_SIZE, MEAN_OFFSET);
    Ok(DynamicImage::ImageLuma8(binarized))
}

/// For each pixel: white if pixel > window mean - offset, black otherwise.
fn adaptive_mean_threshold(img: &GrayImage, block_size: u32, offset: f64) -> GrayImage {
    let (width, height) = img.dimensions();
    let half = block_size as i32 / 2;

    // Integral image makes every window mean an O(1) lookup.
    let integral = integral_image(img);

    GrayImage::from_fn(width, height, |x, y| {
        let x1 = (x as i32 - half).max(0) as u32;
        let y1 = (y as i32 - half).max(0) as u32;
        let x2 = (x as i32 + half).min(width as i32 - 1) as u32;
        let y2 = (y as i32 + half).min(height as i32 - 1) as u32;

        let mean = window_mean(&integral, x1, y1, x2, y2);
        let pixel = img.get_pixel(x, y).0[0] as f64;

        if pixel > mean - offset {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

fn integral_image(img: &GrayImage) -> Vec<Vec<f64>> {
    let (width, height) = img.dimensions();
    let mut integral = vec![vec![0.0f64; width as usize + 1]; height as usize + 1];

    for y in 0..height as usize {
        for x in 0..width as usize {
            let val = img.get_pixel(x as u32, y as u32).0[0] as f64;
            integral[y + 1][x + 1] = val + integral[y][x + 1] + integral[y + 1][x] - integral[y][x];
        }
    }

    integral
}

fn window_mean(integral: &[Vec<f64>], x1: u32, y1: u32, x2: u32, y2: u32) -> f64 {
    let (x1, y1, x2, y2) = (x1 as usize, y1 as usize, x2 as usize + 1, y2 as usize + 1);
    let area = ((x2 - x1) * (y2 - y1)) as f64;

    let sum = integral[y2][x2] - integral[y1][x2] - integral[y2][x1] + integral[y1][x1];
    sum / area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_strictly_binary() {
        let img = GrayImage::from_fn(50, 50, |x, _| Luma([(x as u8).wrapping_mul(5)]));
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        for pixel in result.to_luma8().pixels() {
            assert!(
                pixel.0[0] == 0 || pixel.0[0] == 255,
                "expected binary pixel, got {}",
                pixel.0[0]
            );
        }
    }

    #[test]
    fn dark_glyphs_on_a_light_ground_survive() {
        let mut img = GrayImage::from_pixel(50, 20, Luma([240]));
        for x in 10..40 {
            img.put_pixel(x, 10, Luma([20]));
        }

        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        let gray = result.to_luma8();

        // Glyph row goes black, surrounding ground stays white.
        assert_eq!(gray.get_pixel(25, 10).0[0], 0);
        assert_eq!(gray.get_pixel(25, 5).0[0], 255);
    }

    #[test]
    fn featureless_frames_binarize_to_white() {
        let img = GrayImage::from_pixel(30, 30, Luma([128]));
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        assert!(result.to_luma8().pixels().all(|p| p.0[0] == 255));
    }
}
