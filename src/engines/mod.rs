//! Recognition engine implementations.
//!
//! Implementations of the RecognitionEngine trait. The Tesseract
//! backend is conditionally compiled behind its feature flag; builds
//! without it rely on caller-supplied engines.

#[cfg(feature = "engine-tesseract")]
pub mod tesseract;
