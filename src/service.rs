use crate::config::OcrConfig;
use crate::engine::RecognitionEngine;
use crate::error::OcrError;
use crate::extract::ServerNumberExtractor;
use crate::preprocess::Preprocessor;
use crate::temp::TempPool;
use image::DynamicImage;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

/// The assembled extraction pipeline: preprocessing, recognition and
/// validation composed per request. Requests are independent; the only
/// state shared between them is the temp pool and the engine handle
/// set up at construction.
pub struct ServerNumberOcr {
    preprocessor: Preprocessor,
    extractor: ServerNumberExtractor,
    engine: Box<dyn RecognitionEngine>,
    pool: Arc<TempPool>,
}

impl ServerNumberOcr {
    /// Builds the pipeline with the default Tesseract engine. Setup
    /// failures (trained data, temp pool, engine probe) are fatal.
    #[cfg(feature = "engine-tesseract")]
    pub fn new(config: OcrConfig) -> Result<Self, OcrError> {
        let pool = Arc::new(TempPool::new()?);
        let provider = crate::tessdata::DownloadTessdataProvider::new(&config.language);
        let engine = crate::engines::tesseract::TesseractEngine::new(config, &provider, &pool)?;
        Ok(Self::assemble(pool, Box::new(engine)))
    }

    #[cfg(not(feature = "engine-tesseract"))]
    pub fn new(_config: OcrConfig) -> Result<Self, OcrError> {
        Err(OcrError::Initialization(
            "no recognition engine built in; enable the engine-tesseract feature".to_string(),
        ))
    }

    /// Builds the pipeline around a caller-supplied engine.
    pub fn with_engine(engine: Box<dyn RecognitionEngine>) -> Result<Self, OcrError> {
        let pool = Arc::new(TempPool::new()?);
        Ok(Self::assemble(pool, engine))
    }

    fn assemble(pool: Arc<TempPool>, engine: Box<dyn RecognitionEngine>) -> Self {
        Self {
            preprocessor: Preprocessor::new(Arc::clone(&pool)),
            extractor: ServerNumberExtractor::new(),
            engine,
            pool,
        }
    }

    /// Extracts the server number from a screenshot file.
    pub fn extract_from_path(&self, path: &Path) -> Result<String, OcrError> {
        if !path.exists() {
            return Err(OcrError::InvalidInput(format!(
                "image file does not exist: {}",
                path.display()
            )));
        }
        let prepared = self.preprocessor.prepare_path(path)?;
        self.recognize_and_extract(&prepared)
    }

    /// Extracts the server number from an in-memory bitmap.
    pub fn extract_from_image(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let prepared = self.preprocessor.prepare_image(image)?;
        self.recognize_and_extract(&prepared)
    }

    /// Best-effort variant: any failure, including "no number on this
    /// screen", becomes `None`.
    pub fn try_extract_from_path(&self, path: &Path) -> Option<String> {
        match self.extract_from_path(path) {
            Ok(number) => Some(number),
            Err(e) => {
                tracing::debug!("extraction from {} failed: {e}", path.display());
                None
            }
        }
    }

    /// Best-effort variant for in-memory bitmaps.
    pub fn try_extract_from_image(&self, image: &DynamicImage) -> Option<String> {
        match self.extract_from_image(image) {
            Ok(number) => Some(number),
            Err(e) => {
                tracing::debug!("extraction from bitmap failed: {e}");
                None
            }
        }
    }

    /// Sweeps the temp pool. Intended for shutdown or test teardown;
    /// prepared rasters from in-flight requests are not protected.
    pub fn cleanup(&self) {
        self.pool.cleanup();
    }

    fn recognize_and_extract(&self, prepared: &Path) -> Result<String, OcrError> {
        let text = self.engine.recognize(prepared)?;
        tracing::debug!("raw text from {}: {:?}", self.engine.name(), text);

        let number = self.extractor.extract(&text)?;
        tracing::info!("extracted server number: {}", number);
        Ok(number)
    }
}

static SHARED: OnceLock<ServerNumberOcr> = OnceLock::new();
static SHARED_INIT: Mutex<()> = Mutex::new(());

/// Process-wide pipeline instance with default configuration, built on
/// first use. Concurrent first calls serialize on the init lock and
/// re-check before building; later calls take the lock-free fast path.
pub fn shared() -> Result<&'static ServerNumberOcr, OcrError> {
    if let Some(service) = SHARED.get() {
        return Ok(service);
    }

    let _guard = SHARED_INIT
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(service) = SHARED.get() {
        return Ok(service);
    }

    let service = ServerNumberOcr::new(OcrConfig::default())?;
    let _ = SHARED.set(service);
    SHARED
        .get()
        .ok_or_else(|| OcrError::Initialization("shared pipeline was not initialized".to_string()))
}
