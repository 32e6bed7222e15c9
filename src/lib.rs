//! CheckMate library crate (used by the server, the dataset job and integration tests).
//!
//! # Public API Surface
//!
//! ## Inference
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`SentenceEmbedder`], [`EmbedderConfig`] - Headline embedding
//! - [`LinearClassifier`] - Trained classifier head
//! - [`HeadlinePredictor`], [`Prediction`] - Embed + classify, shared by handlers
//!
//! ## HTTP
//! - [`gateway`] - Axum router, handlers, CORS
//!
//! ## Dataset Preparation
//! - [`dataset::prepare`], [`DatasetConfig`] - CSV → stratified JSONL splits
//!
//! ## Test/Mock Support
//! Stub constructors are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod embedding;
pub mod gateway;
pub mod prediction;

pub use classifier::{ClassifierError, LinearClassifier};
pub use config::{Config, ConfigError};
pub use dataset::{DatasetConfig, DatasetError, Label, LabeledRow, PrepareReport, SplitRatios};
pub use embedding::{EmbedderConfig, EmbeddingError, PoolingStrategy, SentenceEmbedder};
pub use gateway::{GatewayError, GatewayState, create_router_with_state};
pub use prediction::{
    ClassProbs, HeadlinePredictor, LABEL_FAKE, LABEL_REAL, LABEL_UNKNOWN, PredictError,
    Prediction,
};
