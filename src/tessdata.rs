//! Trained-data provisioning for the recognition engine.

use crate::error::OcrError;

/// Provides the trained-recognition data for one language as a byte
/// stream. The production implementation fetches and caches the file;
/// tests substitute a canned provider.
pub trait TessdataProvider: Send + Sync {
    fn traineddata(&self) -> Result<Vec<u8>, OcrError>;
}

#[cfg(feature = "engine-tesseract")]
pub use download::DownloadTessdataProvider;

#[cfg(feature = "engine-tesseract")]
mod download {
    use super::TessdataProvider;
    use crate::error::OcrError;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Fetches `<language>.traineddata` from the tessdata_fast
    /// repository and caches it under the user cache directory, so the
    /// download happens once per machine rather than once per run.
    pub struct DownloadTessdataProvider {
        language: String,
    }

    impl DownloadTessdataProvider {
        pub fn new(language: &str) -> Self {
            Self {
                language: language.to_string(),
            }
        }

        fn cached_path(&self) -> Result<PathBuf, OcrError> {
            let cache_dir = dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("bfv-ocr")
                .join("tessdata");

            fs::create_dir_all(&cache_dir).map_err(|e| {
                OcrError::Initialization(format!("failed to create tessdata cache: {e}"))
            })?;

            Ok(cache_dir.join(format!("{}.traineddata", self.language)))
        }

        fn download(&self, target: &Path) -> Result<(), OcrError> {
            // tessdata_fast keeps the download small.
            let url = format!(
                "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
                self.language
            );

            tracing::info!(
                "downloading tessdata for '{}' (this may take a moment)",
                self.language
            );

            let response = ureq::get(&url).call().map_err(|e| {
                OcrError::Initialization(format!("failed to download tessdata: {e}"))
            })?;

            let bytes = response.into_body().read_to_vec().map_err(|e| {
                OcrError::Initialization(format!("failed to read tessdata response: {e}"))
            })?;

            fs::write(target, bytes).map_err(|e| {
                OcrError::Initialization(format!("failed to write tessdata cache: {e}"))
            })?;

            Ok(())
        }
    }

    impl TessdataProvider for DownloadTessdataProvider {
        fn traineddata(&self) -> Result<Vec<u8>, OcrError> {
            let path = self.cached_path()?;
            if path.exists() {
                tracing::debug!("using cached tessdata at {}", path.display());
            } else {
                self.download(&path)?;
            }
            fs::read(&path)
                .map_err(|e| OcrError::Initialization(format!("failed to read tessdata: {e}")))
        }
    }
}
