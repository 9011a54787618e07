use crate::error::OcrError;
use crate::temp::TempPool;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use super::steps;

/// Suffix for prepared raster files in the temp pool.
const PREPARED_SUFFIX: &str = "_prepared.png";

/// Fixed-order preparation pipeline: crop to the banner region,
/// grayscale, invert, adaptively threshold, upscale, encode to PNG.
///
/// Every call writes its result into the temp pool and hands back the
/// path; the file is left for the pool sweep so engines that read by
/// path keep working. The pipeline is deterministic: byte-identical
/// input produces a byte-identical prepared raster.
pub struct Preprocessor {
    pool: Arc<TempPool>,
}

impl Preprocessor {
    pub fn new(pool: Arc<TempPool>) -> Self {
        Self { pool }
    }

    /// Prepares an on-disk image. A missing or undecodable file is an
    /// invalid-input error, never retried.
    pub fn prepare_path(&self, path: &Path) -> Result<PathBuf, OcrError> {
        if !path.exists() {
            return Err(OcrError::InvalidInput(format!(
                "image file does not exist: {}",
                path.display()
            )));
        }

        let image = image::open(path).map_err(|e| {
            OcrError::InvalidInput(format!("failed to decode {}: {e}", path.display()))
        })?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("frame");
        self.prepare(image, stem)
    }

    /// Prepares an in-memory bitmap.
    pub fn prepare_image(&self, image: &DynamicImage) -> Result<PathBuf, OcrError> {
        self.prepare(image.clone(), "bitmap")
    }

    fn prepare(&self, image: DynamicImage, name: &str) -> Result<PathBuf, OcrError> {
        let start = Instant::now();

        let mut img = run_step("crop", image, steps::crop::apply)?;
        img = run_step("grayscale", img, steps::grayscale::apply)?;
        img = run_step("invert", img, steps::invert::apply)?;
        img = run_step("threshold", img, steps::threshold::apply)?;
        img = run_step("upscale", img, steps::upscale::apply)?;

        let path = self.encode(&img, name)?;

        tracing::debug!(
            "prepared {} in {}ms: {}",
            name,
            start.elapsed().as_millis(),
            path.display()
        );
        Ok(path)
    }

    fn encode(&self, image: &DynamicImage, name: &str) -> Result<PathBuf, OcrError> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| {
                OcrError::Preprocessing(format!("failed to encode prepared raster: {e}"))
            })?;

        let path = self.pool.create_file(&format!("{name}-"), PREPARED_SUFFIX)?;
        std::fs::write(&path, &png).map_err(|e| {
            OcrError::Preprocessing(format!("failed to write prepared raster: {e}"))
        })?;
        Ok(path)
    }
}

fn run_step<F>(name: &str, img: DynamicImage, step: F) -> Result<DynamicImage, OcrError>
where
    F: FnOnce(DynamicImage) -> Result<DynamicImage, OcrError>,
{
    let start = Instant::now();
    let result = step(img)?;
    tracing::trace!("step {} took {}ms", name, start.elapsed().as_millis());
    Ok(result)
}
