use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum PredictError {
    /// Caller-side problem (e.g. blank headline); surfaced as HTTP 400.
    #[error("{0}")]
    InvalidInput(String),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("embedder produces {embedder}-dim vectors but classifier expects {classifier}")]
    DimensionMismatch { embedder: usize, classifier: usize },
}

impl PredictError {
    /// Returns `true` when the request, not the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictError::InvalidInput(_))
    }
}
