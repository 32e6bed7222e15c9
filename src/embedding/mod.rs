//! Embedding + model utilities.
//!
//! - [`sentence`] turns headlines into fixed-length vectors.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Sentence embedder (BERT encoder + pooling).
pub mod sentence;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use sentence::{EmbedderConfig, PoolingStrategy, SentenceEmbedder};
