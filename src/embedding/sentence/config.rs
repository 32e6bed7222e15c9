use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::error::EmbeddingError;

/// How token states are reduced to one sentence vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolingStrategy {
    /// Average over tokens where the attention mask is set.
    #[default]
    Mean,
    /// Hidden state of the first (`[CLS]`) token.
    Cls,
}

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct EmbedderConfig {
    /// Sentence-transformers export directory.
    pub model_dir: PathBuf,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Token pooling.
    pub pooling: PoolingStrategy,
    /// L2-normalise the pooled vector.
    pub normalize: bool,
    /// Output width in stub mode. A loaded model reports its own hidden size.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            pooling: PoolingStrategy::default(),
            normalize: false,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModuleEntry {
    #[serde(default)]
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Default, Deserialize)]
struct PoolingFile {
    #[serde(default)]
    pooling_mode_cls_token: bool,
    #[serde(default)]
    pooling_mode_mean_tokens: bool,
    #[serde(default)]
    pooling_mode_max_tokens: bool,
}

#[derive(Debug, Deserialize)]
struct SentenceBertFile {
    max_seq_length: Option<usize>,
}

impl EmbedderConfig {
    /// BERT architecture config.
    pub const CONFIG_FILE: &'static str = "config.json";
    /// Encoder weights.
    pub const WEIGHTS_FILE: &'static str = "model.safetensors";
    /// Tokenizer definition.
    pub const TOKENIZER_FILE: &'static str = "tokenizer.json";
    /// Sentence-transformers module pipeline.
    pub const MODULES_FILE: &'static str = "modules.json";
    /// Sentence-transformers encoder settings.
    pub const SENTENCE_CONFIG_FILE: &'static str = "sentence_bert_config.json";
    const DEFAULT_POOLING_DIR: &'static str = "1_Pooling";

    /// Creates a config for a model directory with default pooling settings.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Reads pooling, normalisation and sequence length from a sentence-transformers export.
    ///
    /// `modules.json` decides which pooling config applies and whether a
    /// `Normalize` stage follows it. Without `modules.json`, `1_Pooling/config.json`
    /// is used when present and mean pooling otherwise.
    pub fn from_model_dir<P: Into<PathBuf>>(model_dir: P) -> Result<Self, EmbeddingError> {
        let mut config = Self::new(model_dir);

        if !config.model_dir.is_dir() {
            return Err(EmbeddingError::MissingFile {
                path: config.model_dir.clone(),
            });
        }

        let modules_path = config.model_dir.join(Self::MODULES_FILE);
        let pooling_dir = if modules_path.is_file() {
            let modules: Vec<ModuleEntry> = read_json(&modules_path)?;
            config.normalize = modules.iter().any(|m| m.kind.ends_with("Normalize"));
            modules
                .iter()
                .find(|m| m.kind.ends_with("Pooling"))
                .map(|m| config.model_dir.join(&m.path))
        } else {
            Some(config.model_dir.join(Self::DEFAULT_POOLING_DIR))
        };

        if let Some(pooling_config) = pooling_dir
            .map(|dir| dir.join("config.json"))
            .filter(|path| path.is_file())
        {
            let pooling: PoolingFile = read_json(&pooling_config)?;
            config.pooling = pooling_strategy(&pooling)?;
        }

        let sentence_config = config.model_dir.join(Self::SENTENCE_CONFIG_FILE);
        if sentence_config.is_file() {
            let settings: SentenceBertFile = read_json(&sentence_config)?;
            if let Some(max_seq_len) = settings.max_seq_length {
                config.max_seq_len = max_seq_len;
            }
        }

        Ok(config)
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            normalize: true,
            ..Default::default()
        }
    }

    /// Overrides the stub output width.
    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be positive".to_string(),
            });
        }

        if self.testing_stub {
            if self.embedding_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "embedding_dim must be positive".to_string(),
                });
            }
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        for path in [self.config_path(), self.weights_path(), self.tokenizer_path()] {
            if !path.is_file() {
                return Err(EmbeddingError::MissingFile { path });
            }
        }

        Ok(())
    }

    /// Path to the BERT `config.json`.
    pub fn config_path(&self) -> PathBuf {
        self.model_dir.join(Self::CONFIG_FILE)
    }

    /// Path to `model.safetensors`.
    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join(Self::WEIGHTS_FILE)
    }

    /// Path to `tokenizer.json`.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(Self::TOKENIZER_FILE)
    }
}

fn pooling_strategy(file: &PoolingFile) -> Result<PoolingStrategy, EmbeddingError> {
    match (file.pooling_mode_mean_tokens, file.pooling_mode_cls_token) {
        (true, false) => Ok(PoolingStrategy::Mean),
        (false, true) => Ok(PoolingStrategy::Cls),
        (true, true) => Err(EmbeddingError::InvalidConfig {
            reason: "concatenated mean+cls pooling is not supported".to_string(),
        }),
        (false, false) if file.pooling_mode_max_tokens => Err(EmbeddingError::InvalidConfig {
            reason: "max-token pooling is not supported".to_string(),
        }),
        (false, false) => Err(EmbeddingError::InvalidConfig {
            reason: "pooling config enables no pooling mode".to_string(),
        }),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, EmbeddingError> {
    let content = std::fs::read_to_string(path).map_err(|e| EmbeddingError::LoadFailed {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    serde_json::from_str(&content).map_err(|e| EmbeddingError::InvalidConfig {
        reason: format!("failed to parse {}: {}", path.display(), e),
    })
}
