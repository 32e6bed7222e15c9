use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// A directory or file of the sentence-transformers export is absent.
    #[error("embedder file missing: {path}")]
    MissingFile { path: PathBuf },

    #[error("could not load sentence encoder: {reason}")]
    LoadFailed { reason: String },

    #[error("could not tokenize headline: {reason}")]
    TokenizationFailed { reason: String },

    #[error("encoder forward pass failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("bad embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
