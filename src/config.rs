use serde::Deserialize;
use std::path::PathBuf;

/// Recognition engine parameters.
///
/// The defaults are tuned for the server banner: the whitelist limits
/// recognition to digits and `#`, and the sparse-text page segmentation
/// mode suits the mostly empty banner region.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language identifier for the trained data (e.g. "eng").
    pub language: String,
    /// Tesseract OCR engine mode.
    pub oem: u32,
    /// Tesseract page segmentation mode.
    pub psm: u32,
    /// Characters recognition is restricted to.
    pub char_whitelist: String,
    /// Resolution hint for rasters without DPI metadata.
    pub dpi: u32,
    /// Existing tessdata directory to use instead of staging one.
    pub datapath: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            oem: 1,
            psm: 11,
            char_whitelist: "#0123456789".to_string(),
            dpi: 300,
            datapath: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_restrict_recognition_to_the_banner_alphabet() {
        let config = OcrConfig::default();
        assert_eq!(config.language, "eng");
        assert_eq!(config.char_whitelist, "#0123456789");
        assert!(config.datapath.is_none());
    }

    #[test]
    fn partial_key_value_sources_fall_back_to_defaults() {
        let config: OcrConfig = serde_json::from_str(r#"{"language": "deu", "psm": 6}"#).unwrap();
        assert_eq!(config.language, "deu");
        assert_eq!(config.psm, 6);
        assert_eq!(config.char_whitelist, "#0123456789");
        assert_eq!(config.dpi, 300);
    }
}
