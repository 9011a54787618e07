//! Tesseract engine implementation.
//!
//! Uses the tesseract-static crate for static linking (no system
//! dependencies). The trained data is staged into the temp pool once at
//! construction; every recognition call then creates a short-lived
//! Tesseract instance against that datapath.

use crate::config::OcrConfig;
use crate::engine::RecognitionEngine;
use crate::error::OcrError;
use crate::temp::TempPool;
use crate::tessdata::TessdataProvider;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tesseract_static::tesseract::Tesseract;

/// Pool subdirectory the trained data is staged into.
const TESSDATA_DIR: &str = "tessdata";

pub struct TesseractEngine {
    datapath: String,
    config: OcrConfig,
}

impl TesseractEngine {
    /// Stages the trained data and probe-initializes the engine once.
    /// Failures here are fatal to pipeline construction; there is no
    /// degraded mode.
    pub fn new(
        config: OcrConfig,
        provider: &dyn TessdataProvider,
        pool: &TempPool,
    ) -> Result<Self, OcrError> {
        let datapath = match &config.datapath {
            Some(path) => path
                .to_str()
                .map(|s| s.to_string())
                .ok_or_else(|| {
                    OcrError::Initialization("tessdata path is not valid UTF-8".to_string())
                })?,
            None => stage_tessdata(&config.language, provider, pool)?,
        };

        let probe = Tesseract::new(Some(&datapath), Some(&config.language)).map_err(|e| {
            OcrError::Initialization(format!("failed to initialize Tesseract: {e}"))
        })?;
        drop(probe);

        tracing::info!(
            "Tesseract engine ready (datapath: {}, language: {})",
            datapath,
            config.language
        );

        Ok(Self { datapath, config })
    }
}

/// Copies the provider's trained data into `<pool>/tessdata/` and
/// returns that directory, which is what Tesseract expects as datapath.
fn stage_tessdata(
    language: &str,
    provider: &dyn TessdataProvider,
    pool: &TempPool,
) -> Result<String, OcrError> {
    let dir = pool.create_dir(TESSDATA_DIR)?;
    let target = dir.join(format!("{language}.traineddata"));

    if !target.exists() {
        let bytes = provider.traineddata()?;
        fs::write(&target, bytes).map_err(|e| {
            OcrError::Initialization(format!("failed to stage tessdata: {e}"))
        })?;
        tracing::debug!("staged tessdata at {}", target.display());
    }

    dir.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| OcrError::Initialization("tessdata path is not valid UTF-8".to_string()))
}

impl RecognitionEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, raster: &Path) -> Result<String, OcrError> {
        let img = image::open(raster).map_err(|e| {
            OcrError::Recognition(format!("failed to load prepared raster: {e}"))
        })?;
        let rgb = img.to_rgb8();

        // Leptonica always understands BMP, so hand the raster over in
        // memory rather than relying on file-format sniffing.
        let mut bmp = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut bmp), image::ImageFormat::Bmp)
            .map_err(|e| OcrError::Recognition(format!("failed to convert raster to BMP: {e}")))?;

        let mut tess = Tesseract::new(Some(&self.datapath), Some(&self.config.language))
            .map_err(|e| OcrError::Recognition(format!("failed to create Tesseract: {e}")))?;

        for (name, value) in [
            ("tessedit_char_whitelist", self.config.char_whitelist.clone()),
            ("tessedit_pageseg_mode", self.config.psm.to_string()),
            ("tessedit_ocr_engine_mode", self.config.oem.to_string()),
            ("user_defined_dpi", self.config.dpi.to_string()),
        ] {
            tess = tess
                .set_variable(name, &value)
                .map_err(|e| OcrError::Recognition(format!("failed to set {name}: {e}")))?;
        }

        tess = tess
            .set_image_from_mem(&bmp)
            .map_err(|e| OcrError::Recognition(format!("failed to set image: {e}")))?;
        tess = tess
            .recognize()
            .map_err(|e| OcrError::Recognition(format!("recognition failed: {e}")))?;

        let text = tess
            .get_text()
            .map_err(|e| OcrError::Recognition(format!("failed to read recognized text: {e}")))?;

        tracing::debug!("recognized {} chars from {}", text.len(), raster.display());
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedTessdata;

    impl TessdataProvider for CannedTessdata {
        fn traineddata(&self) -> Result<Vec<u8>, OcrError> {
            Ok(b"trained-bytes".to_vec())
        }
    }

    #[test]
    fn staging_writes_the_traineddata_into_the_pool() {
        let pool = TempPool::new().unwrap();
        let datapath = stage_tessdata("eng", &CannedTessdata, &pool).unwrap();

        let staged = Path::new(&datapath).join("eng.traineddata");
        assert!(staged.starts_with(pool.path()));
        assert_eq!(fs::read(&staged).unwrap(), b"trained-bytes");
    }

    #[test]
    fn staging_is_reused_on_second_call() {
        let pool = TempPool::new().unwrap();
        let first = stage_tessdata("eng", &CannedTessdata, &pool).unwrap();
        // Overwrite the staged file, then stage again: the existing copy wins.
        fs::write(Path::new(&first).join("eng.traineddata"), b"already-there").unwrap();
        let second = stage_tessdata("eng", &CannedTessdata, &pool).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            fs::read(Path::new(&second).join("eng.traineddata")).unwrap(),
            b"already-there"
        );
    }
}
