//! A one-layer BERT exported in the sentence-transformers directory layout.
//!
//! Weights are randomly initialised, so only structural properties
//! (determinism, widths, probability invariants) are meaningful.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use checkmate::classifier::LinearClassifier;
use serde_json::{Value, json};

pub const TINY_HIDDEN: usize = 32;
/// Token budget written to `sentence_bert_config.json`; well under the position table.
pub const TINY_MAX_SEQ_LEN: usize = 8;
const TINY_MAX_POSITIONS: usize = 16;

pub const VOCAB: &[&str] = &[
    "[PAD]",
    "[UNK]",
    "[CLS]",
    "[SEP]",
    "breaking",
    "news",
    "today",
    "scientists",
    "discover",
    "new",
    "species",
    "officials",
    "report",
    "president",
    "says",
    "shocking",
];

/// Options for [`write_tiny_embedder`].
#[derive(Debug, Clone, Copy)]
pub struct TinyEmbedderOptions {
    pub normalize: bool,
    pub cls_pooling: bool,
}

impl Default for TinyEmbedderOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            cls_pooling: false,
        }
    }
}

fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn bert_config_json() -> Value {
    json!({
        "architectures": ["BertModel"],
        "model_type": "bert",
        "vocab_size": VOCAB.len(),
        "hidden_size": TINY_HIDDEN,
        "num_hidden_layers": 1,
        "num_attention_heads": 2,
        "intermediate_size": 64,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.0,
        "max_position_embeddings": TINY_MAX_POSITIONS,
        "type_vocab_size": 2,
        "initializer_range": 0.02,
        "layer_norm_eps": 1e-12,
        "pad_token_id": 0
    })
}

fn tokenizer_json() -> Value {
    let vocab: serde_json::Map<String, Value> = VOCAB
        .iter()
        .enumerate()
        .map(|(id, token)| (token.to_string(), json!(id)))
        .collect();

    json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": { "type": "Lowercase" },
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": {
            "type": "BertProcessing",
            "sep": ["[SEP]", 3],
            "cls": ["[CLS]", 2]
        },
        "decoder": null,
        "model": { "type": "WordLevel", "vocab": vocab, "unk_token": "[UNK]" }
    })
}

fn modules_json(normalize: bool) -> Value {
    let mut modules = vec![
        json!({"idx": 0, "name": "0", "path": "", "type": "sentence_transformers.models.Transformer"}),
        json!({"idx": 1, "name": "1", "path": "1_Pooling", "type": "sentence_transformers.models.Pooling"}),
    ];
    if normalize {
        modules.push(json!({
            "idx": 2, "name": "2", "path": "2_Normalize",
            "type": "sentence_transformers.models.Normalize"
        }));
    }
    Value::Array(modules)
}

/// Writes config, tokenizer, pooling files and freshly initialised weights into `dir`.
pub fn write_tiny_embedder(dir: &Path, options: TinyEmbedderOptions) {
    let config_json = bert_config_json();
    write_json(&dir.join("config.json"), &config_json);
    write_json(&dir.join("tokenizer.json"), &tokenizer_json());
    write_json(&dir.join("modules.json"), &modules_json(options.normalize));
    write_json(
        &dir.join("sentence_bert_config.json"),
        &json!({ "max_seq_length": TINY_MAX_SEQ_LEN, "do_lower_case": false }),
    );
    write_json(
        &dir.join("1_Pooling").join("config.json"),
        &json!({
            "word_embedding_dimension": TINY_HIDDEN,
            "pooling_mode_cls_token": options.cls_pooling,
            "pooling_mode_mean_tokens": !options.cls_pooling,
            "pooling_mode_max_tokens": false
        }),
    );

    let config: BertConfig = serde_json::from_value(config_json).unwrap();
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    BertModel::load(vb, &config).unwrap();
    varmap.save(dir.join("model.safetensors")).unwrap();
}

/// Copies an export from `src` to `dst`, renaming every weight to `{prefix}.{name}`
/// the way task-specific Hugging Face checkpoints store them.
pub fn copy_with_weight_prefix(src: &Path, dst: &Path, prefix: &str) {
    for rel in [
        "config.json",
        "tokenizer.json",
        "modules.json",
        "sentence_bert_config.json",
        "1_Pooling/config.json",
    ] {
        let target = dst.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::copy(src.join(rel), target).unwrap();
    }

    let tensors = candle_core::safetensors::load(src.join("model.safetensors"), &Device::Cpu)
        .unwrap();
    let renamed: HashMap<String, Tensor> = tensors
        .into_iter()
        .map(|(name, tensor)| (format!("{}.{}", prefix, name), tensor))
        .collect();
    candle_core::safetensors::save(&renamed, dst.join("model.safetensors")).unwrap();
}

/// Binary classifier over the tiny embedder's width with fixed, non-trivial weights.
pub fn tiny_classifier() -> LinearClassifier {
    let coef = (0..TINY_HIDDEN)
        .map(|i| {
            let weight = if i % 2 == 0 { 0.75 } else { -0.5 };
            weight * (1.0 + i as f32 / 16.0)
        })
        .collect();
    LinearClassifier::from_parts(vec![coef], vec![0.1], vec![0, 1]).unwrap()
}
