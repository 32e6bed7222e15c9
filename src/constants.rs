//! Cross-cutting, shared constants.
//!
//! Artifact locations are relative to the working directory the server is
//! started from, mirroring the layout the training step exports.

/// Default sentence-transformers model directory.
pub const DEFAULT_EMBEDDER_DIR: &str = "models/embedder_classifier/embedder";

/// Default classifier weights file.
pub const DEFAULT_CLASSIFIER_PATH: &str = "models/embedder_classifier/classifier.safetensors";

/// Origins allowed when `ALLOWED_ORIGINS` is not set (local frontend dev servers).
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Host suffix of preview/production deployments that are always allowed over HTTPS.
pub const DEPLOYMENT_ORIGIN_SUFFIX: &str = ".vercel.app";

/// Embedding width of the stub embedder (matches MiniLM-class encoders).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the encoder when the model directory does not say otherwise.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Tolerance used when checking that class probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Fixed seed for dataset splits.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Titles with fewer whitespace-separated tokens are dropped.
pub const DEFAULT_MIN_TOKENS: usize = 3;

/// Default raw dataset locations and output directory.
pub const DEFAULT_FAKE_CSV: &str = "data/raw/fake.csv";
pub const DEFAULT_REAL_CSV: &str = "data/raw/real.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "data/processed";
