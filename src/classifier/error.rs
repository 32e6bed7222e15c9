use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier weights not found at path: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to load classifier: {reason}")]
    LoadFailed { reason: String },

    #[error("classifier weights missing tensor '{name}'")]
    MissingTensor { name: &'static str },

    #[error("invalid classifier shape: {reason}")]
    InvalidShape { reason: String },

    #[error("embedding dimension mismatch: classifier expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl From<candle_core::Error> for ClassifierError {
    fn from(err: candle_core::Error) -> Self {
        ClassifierError::LoadFailed {
            reason: err.to_string(),
        }
    }
}
