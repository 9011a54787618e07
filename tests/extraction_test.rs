use bfv_ocr::{OcrError, RecognitionEngine, ServerNumberOcr};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;

/// Engine double that returns a canned text block, standing in for a
/// recognizer reading the prepared raster.
struct FixedTextEngine {
    text: &'static str,
}

impl RecognitionEngine for FixedTextEngine {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn recognize(&self, raster: &Path) -> Result<String, OcrError> {
        assert!(raster.exists(), "engine should receive an on-disk raster");
        Ok(self.text.trim().to_string())
    }
}

/// Engine double that fails like a crashed recognizer.
struct FailingEngine;

impl RecognitionEngine for FailingEngine {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn recognize(&self, _raster: &Path) -> Result<String, OcrError> {
        Err(OcrError::Recognition("engine gave up".to_string()))
    }
}

fn service(text: &'static str) -> ServerNumberOcr {
    ServerNumberOcr::with_engine(Box::new(FixedTextEngine { text })).unwrap()
}

/// A frame resembling the server browser: a row of light blocks (the
/// glyph row) near the top-left of a dark background.
fn synthetic_screenshot() -> DynamicImage {
    let mut img = RgbImage::from_pixel(640, 360, Rgb([18, 18, 24]));
    for i in 0..6i32 {
        draw_filled_rect_mut(
            &mut img,
            Rect::at(40 + i * 18, 30).of_size(10, 16),
            Rgb([230, 230, 235]),
        );
    }
    DynamicImage::ImageRgb8(img)
}

#[test]
fn extracts_the_number_the_engine_reads_from_the_banner() {
    let ocr = service("TEAM DEATHMATCH\n#77665\n64 PLAYERS");
    let number = ocr.extract_from_image(&synthetic_screenshot()).unwrap();
    assert_eq!(number, "77665");
    ocr.cleanup();
}

#[test]
fn extracts_from_a_saved_screenshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teamdeathmatch77665.png");
    synthetic_screenshot().save(&path).unwrap();

    let ocr = service("#77665");
    assert_eq!(ocr.extract_from_path(&path).unwrap(), "77665");
}

#[test]
fn a_textless_black_frame_reports_not_found() {
    let ocr = service("");
    let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(320, 240, Rgb([0, 0, 0])));
    let err = ocr.extract_from_image(&black).unwrap_err();
    assert!(matches!(err, OcrError::NoServerNumber));
}

#[test]
fn decoy_digit_clusters_are_all_rejected() {
    let text = "weapon stats since round start\nkills 12 deaths 7 score 4590\n\
                assists 3 revives 9 streak 2\nheadshots 11 accuracy 47\n\
                vehicle time 302 seconds\nping history 45 52 61 48\n\
                squad points total #1234 earned this round";
    let ocr = service(text);
    let err = ocr.extract_from_image(&synthetic_screenshot()).unwrap_err();
    assert!(matches!(err, OcrError::NoServerNumber));
}

#[test]
fn recognition_failures_are_distinct_from_not_found() {
    let ocr = ServerNumberOcr::with_engine(Box::new(FailingEngine)).unwrap();
    let err = ocr.extract_from_image(&synthetic_screenshot()).unwrap_err();
    assert!(matches!(err, OcrError::Recognition(_)));
}

#[test]
fn a_missing_file_is_invalid_input() {
    let ocr = service("#123");
    let err = ocr
        .extract_from_path(Path::new("/definitely/not/here.png"))
        .unwrap_err();
    assert!(matches!(err, OcrError::InvalidInput(_)));
}

#[test]
fn try_variants_swallow_every_failure() {
    let failing = ServerNumberOcr::with_engine(Box::new(FailingEngine)).unwrap();
    assert_eq!(failing.try_extract_from_image(&synthetic_screenshot()), None);
    assert_eq!(failing.try_extract_from_path(Path::new("/nope.png")), None);

    let ocr = service("LOADING\n#42901");
    assert_eq!(
        ocr.try_extract_from_image(&synthetic_screenshot()),
        Some("42901".to_string())
    );
}

#[test]
fn cleanup_leaves_the_pipeline_usable() {
    let ocr = service("#33044");
    assert_eq!(
        ocr.extract_from_image(&synthetic_screenshot()).unwrap(),
        "33044"
    );
    ocr.cleanup();
    assert_eq!(
        ocr.extract_from_image(&synthetic_screenshot()).unwrap(),
        "33044"
    );
}
