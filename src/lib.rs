//! Server-number extraction from Battlefield V screenshots.
//!
//! The pipeline crops the fixed upper-left banner region where the
//! server number renders, cleans it up for recognition (grayscale,
//! inversion, adaptive thresholding, upscaling), hands the prepared
//! raster to a Tesseract engine, and distills the raw text into a
//! validated 3-5 digit number while rejecting look-alike noise.
//!
//! ```no_run
//! use bfv_ocr::{OcrConfig, ServerNumberOcr};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), bfv_ocr::OcrError> {
//! let ocr = ServerNumberOcr::new(OcrConfig::default())?;
//! let number = ocr.extract_from_path(Path::new("screenshot.png"))?;
//! println!("#{number}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod extract;
pub mod preprocess;
pub mod service;
pub mod temp;
pub mod tessdata;

pub use config::OcrConfig;
pub use engine::RecognitionEngine;
pub use error::OcrError;
pub use extract::{strip_hash, ServerNumberExtractor};
pub use preprocess::Preprocessor;
pub use service::{shared, ServerNumberOcr};
pub use temp::TempPool;
pub use tessdata::TessdataProvider;
