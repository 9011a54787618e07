use thiserror::Error;

/// Failure modes of the extraction pipeline.
///
/// `InvalidInput` and `NoServerNumber` are precise so callers can tell
/// a bad call apart from a screenshot that simply has no number on it.
/// Everything else collapses into a processing variant carrying the
/// underlying cause in its message.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    #[error("recognition failed: {0}")]
    Recognition(String),

    #[error("no valid server number found")]
    NoServerNumber,

    #[error("failed to initialize OCR pipeline: {0}")]
    Initialization(String),
}
