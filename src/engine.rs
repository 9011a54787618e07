use crate::error::OcrError;
use std::path::Path;

/// Capability interface for the external recognition engine.
///
/// The pipeline hands an engine a prepared raster on disk and consumes
/// a single block of recognized text in return. Implementations are
/// injected at construction, so tests substitute doubles without
/// touching the pipeline itself.
pub trait RecognitionEngine: Send + Sync {
    /// Engine identifier used in logs.
    fn name(&self) -> &'static str;

    /// Recognize the text content of a prepared raster file.
    fn recognize(&self, raster: &Path) -> Result<String, OcrError>;
}
