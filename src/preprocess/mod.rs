//! Deterministic image preparation for the recognition engine.
//!
//! Isolates the banner region the server number renders in and cleans
//! it up so the engine sees dark, binarized glyphs on a light ground.

pub mod pipeline;
pub mod steps;

pub use pipeline::Preprocessor;
