//! The production encoder path: a tiny BERT export read by the real loaders.

mod common;

use std::path::Path;

use checkmate::classifier::LinearClassifier;
use checkmate::config::Config;
use checkmate::constants::PROBABILITY_TOLERANCE;
use checkmate::embedding::{EmbedderConfig, PoolingStrategy, SentenceEmbedder};
use checkmate::prediction::{HeadlinePredictor, PredictError};
use tempfile::TempDir;

use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::TestClient;
use common::tiny_bert::{
    TINY_HIDDEN, TINY_MAX_SEQ_LEN, TinyEmbedderOptions, copy_with_weight_prefix, tiny_classifier,
    write_tiny_embedder,
};

fn export(options: TinyEmbedderOptions) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_tiny_embedder(dir.path(), options);
    dir
}

fn load_embedder(dir: &Path) -> SentenceEmbedder {
    let config = EmbedderConfig::from_model_dir(dir).expect("export should parse");
    SentenceEmbedder::load(config).expect("encoder should load")
}

/// Writes an embedder export plus a matching classifier under `dir` and returns their config.
fn artifacts_in(dir: &Path) -> Config {
    let embedder_dir = dir.join("embedder");
    write_tiny_embedder(&embedder_dir, TinyEmbedderOptions::default());
    let classifier_path = dir.join("classifier.safetensors");
    tiny_classifier().save(&classifier_path).unwrap();

    Config {
        embedder_dir,
        classifier_path,
        ..Default::default()
    }
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[test]
fn test_export_settings_are_read() {
    let dir = export(TinyEmbedderOptions::default());
    let config = EmbedderConfig::from_model_dir(dir.path()).unwrap();
    assert_eq!(config.max_seq_len, TINY_MAX_SEQ_LEN);
    assert_eq!(config.pooling, PoolingStrategy::Mean);
    assert!(config.normalize);
    assert!(!config.testing_stub);

    let dir = export(TinyEmbedderOptions {
        normalize: false,
        cls_pooling: true,
    });
    let config = EmbedderConfig::from_model_dir(dir.path()).unwrap();
    assert_eq!(config.pooling, PoolingStrategy::Cls);
    assert!(!config.normalize);
}

#[test]
fn test_encoder_embeds_deterministically() {
    let dir = export(TinyEmbedderOptions::default());
    let embedder = load_embedder(dir.path());

    assert!(!embedder.is_stub());
    assert_eq!(embedder.embedding_dim(), TINY_HIDDEN);

    let first = embedder.embed("Breaking news today").unwrap();
    let second = embedder.embed("Breaking news today").unwrap();
    assert_eq!(first.len(), TINY_HIDDEN);
    assert_eq!(first, second);
    assert!(first.iter().all(|x| x.is_finite()));
    assert!((norm(&first) - 1.0).abs() < 1e-4, "norm {}", norm(&first));

    let other = embedder.embed("Scientists discover new species").unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_cls_pooling_without_normalize_loads() {
    let dir = export(TinyEmbedderOptions {
        normalize: false,
        cls_pooling: true,
    });
    let embedder = load_embedder(dir.path());

    let embedding = embedder.embed("President says shocking report").unwrap();
    assert_eq!(embedding.len(), TINY_HIDDEN);
    assert!(embedding.iter().all(|x| x.is_finite()));
    assert_eq!(embedding, embedder.embed("President says shocking report").unwrap());
}

#[test]
fn test_long_headline_is_truncated() {
    let dir = export(TinyEmbedderOptions::default());
    let embedder = load_embedder(dir.path());

    // [CLS] and [SEP] take two of the eight token slots.
    let words = ["officials", "report", "new", "species", "president", "says"];
    let kept = words.join(" ");
    let long = std::iter::repeat(kept.as_str())
        .take(7)
        .collect::<Vec<_>>()
        .join(" ");

    let truncated = embedder.embed(&long).expect("long input must not overflow positions");
    assert_eq!(truncated, embedder.embed(&kept).unwrap());
}

#[test]
fn test_prefixed_checkpoints_load_same_weights() {
    let original = export(TinyEmbedderOptions::default());
    let expected = load_embedder(original.path())
        .embed("Officials report new species")
        .unwrap();

    for prefix in ["bert", "roberta"] {
        let copy = TempDir::new().unwrap();
        copy_with_weight_prefix(original.path(), copy.path(), prefix);

        let embedding = load_embedder(copy.path())
            .embed("Officials report new species")
            .unwrap();
        assert_eq!(embedding, expected, "prefix {}", prefix);
    }
}

#[test]
fn test_predictor_loads_real_embedder() {
    let dir = TempDir::new().unwrap();
    let config = artifacts_in(dir.path());
    config.validate().unwrap();

    let predictor = HeadlinePredictor::load(&config).unwrap();
    assert!(!predictor.is_stub());
    assert_eq!(predictor.embedding_dim(), TINY_HIDDEN);

    for headline in [
        "Breaking news today",
        "Scientists discover new species",
        "zzz qqq unheard words",
    ] {
        let prediction = predictor.predict(headline).unwrap();

        assert!(prediction.label == "fake" || prediction.label == "real");
        for p in [prediction.probs.fake, prediction.probs.real] {
            assert!((0.0..=1.0).contains(&p));
        }
        assert!((prediction.probs.fake + prediction.probs.real - 1.0).abs() < PROBABILITY_TOLERANCE);
        assert_eq!(Some(prediction.score), prediction.probs.get(&prediction.label));
        assert_eq!(prediction, predictor.predict(headline).unwrap());
    }
}

#[test]
fn test_real_predictor_trims_and_rejects_blank() {
    let dir = TempDir::new().unwrap();
    let predictor = HeadlinePredictor::load(&artifacts_in(dir.path())).unwrap();

    assert_eq!(
        predictor.predict("  Breaking news today \n").unwrap(),
        predictor.predict("Breaking news today").unwrap()
    );
    assert!(matches!(
        predictor.predict(" \t "),
        Err(PredictError::InvalidInput(_))
    ));
}

#[test]
fn test_real_embedder_width_must_match_classifier() {
    let dir = TempDir::new().unwrap();
    let config = artifacts_in(dir.path());
    LinearClassifier::from_parts(vec![vec![0.5; TINY_HIDDEN / 2]], vec![0.0], vec![0, 1])
        .unwrap()
        .save(&config.classifier_path)
        .unwrap();

    match HeadlinePredictor::load(&config) {
        Err(PredictError::DimensionMismatch {
            embedder,
            classifier,
        }) => {
            assert_eq!(embedder, TINY_HIDDEN);
            assert_eq!(classifier, TINY_HIDDEN / 2);
        }
        other => panic!("expected DimensionMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_with_real_embedder() {
    let dir = TempDir::new().unwrap();
    let config = artifacts_in(dir.path());
    let direct = HeadlinePredictor::load(&config).unwrap();

    let server = spawn_test_server(TestServerConfig {
        predictor: Some(HeadlinePredictor::load(&config).unwrap()),
        ..Default::default()
    })
    .await
    .expect("Server should start");
    let client = TestClient::new(server.url());

    let headline = "Scientists discover new species";
    let via_http = client.predict(headline).await.expect("prediction should succeed");
    let expected = direct.predict(headline).unwrap();

    assert_eq!(via_http.label, expected.label);
    assert!((via_http.score - expected.score).abs() < PROBABILITY_TOLERANCE);
}
