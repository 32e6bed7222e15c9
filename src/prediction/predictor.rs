use tracing::{debug, info, warn};

use crate::classifier::LinearClassifier;
use crate::config::Config;
use crate::embedding::{EmbedderConfig, SentenceEmbedder};

use super::error::PredictError;
use super::types::{ClassProbs, LABEL_UNKNOWN, Prediction, label_for_class};

/// Message returned when the headline is blank after trimming.
pub const EMPTY_HEADLINE_MESSAGE: &str = "headline is empty";

/// Loaded embedder + classifier pair.
///
/// Built once at startup and shared read-only by all requests; nothing in it
/// changes after construction.
#[derive(Debug)]
pub struct HeadlinePredictor {
    embedder: SentenceEmbedder,
    classifier: LinearClassifier,
}

impl HeadlinePredictor {
    /// Pairs an embedder with a classifier, checking that their widths agree.
    pub fn new(
        embedder: SentenceEmbedder,
        classifier: LinearClassifier,
    ) -> Result<Self, PredictError> {
        if embedder.embedding_dim() != classifier.input_dim() {
            return Err(PredictError::DimensionMismatch {
                embedder: embedder.embedding_dim(),
                classifier: classifier.input_dim(),
            });
        }

        Ok(Self {
            embedder,
            classifier,
        })
    }

    /// Loads both artifacts named by `config`. Any failure is fatal to startup.
    pub fn load(config: &Config) -> Result<Self, PredictError> {
        let classifier = LinearClassifier::load(&config.classifier_path)?;

        let embedder_config = if config.stub_embedder {
            warn!("CHECKMATE_STUB_EMBEDDER set, predictions are not meaningful");
            EmbedderConfig::stub().with_embedding_dim(classifier.input_dim())
        } else {
            EmbedderConfig::from_model_dir(&config.embedder_dir)?
        };
        let embedder = SentenceEmbedder::load(embedder_config)?;

        let predictor = Self::new(embedder, classifier)?;
        info!(
            embedding_dim = predictor.embedding_dim(),
            stub = predictor.embedder.is_stub(),
            "Headline predictor ready"
        );

        Ok(predictor)
    }

    /// Classifies one headline.
    ///
    /// Blank input (after trimming) is rejected with [`PredictError::InvalidInput`].
    pub fn predict(&self, headline: &str) -> Result<Prediction, PredictError> {
        let text = headline.trim();
        if text.is_empty() {
            return Err(PredictError::InvalidInput(EMPTY_HEADLINE_MESSAGE.to_string()));
        }

        let embedding = self.embedder.embed(text)?;
        let columns = self.classifier.predict_proba(&embedding)?;
        let class = self.classifier.predict(&embedding)?;
        let probs = ClassProbs::from(columns);

        let prediction = match label_for_class(class) {
            Some(label) => Prediction {
                label: label.to_string(),
                score: probs.get(label).unwrap_or_default(),
                probs,
            },
            None => {
                // Only reachable with a classifier trained on other class ids.
                warn!(class, "Classifier returned a class outside the label table");
                Prediction {
                    label: LABEL_UNKNOWN.to_string(),
                    score: columns[0].max(columns[1]),
                    probs,
                }
            }
        };

        debug!(
            label = %prediction.label,
            score = prediction.score,
            text_len = text.len(),
            "Headline classified"
        );

        Ok(prediction)
    }

    /// Width of the vectors passed from embedder to classifier.
    pub fn embedding_dim(&self) -> usize {
        self.classifier.input_dim()
    }

    /// Returns `true` if the embedder runs in stub mode.
    pub fn is_stub(&self) -> bool {
        self.embedder.is_stub()
    }
}

#[cfg(any(test, feature = "mock"))]
impl HeadlinePredictor {
    /// Stub embedder + deterministic classifier; no files needed.
    pub fn stub(embedding_dim: usize) -> Self {
        let embedder = SentenceEmbedder::load(
            EmbedderConfig::stub().with_embedding_dim(embedding_dim.max(1)),
        )
        .expect("stub embedder config is always valid");

        Self {
            embedder,
            classifier: LinearClassifier::stub(embedding_dim),
        }
    }

    /// Stub embedder paired with a caller-supplied classifier.
    pub fn stub_with_classifier(classifier: LinearClassifier) -> Self {
        let embedder = SentenceEmbedder::load(
            EmbedderConfig::stub().with_embedding_dim(classifier.input_dim()),
        )
        .expect("stub embedder config is always valid");

        Self {
            embedder,
            classifier,
        }
    }
}
