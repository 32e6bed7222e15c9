//! Headline → label prediction.
//!
//! [`HeadlinePredictor`] is the application context: it owns the embedder and
//! the classifier, is built once at startup, and is shared behind an `Arc` by
//! every request handler.

pub mod error;
pub mod predictor;
pub mod types;


pub use error::PredictError;
pub use predictor::{EMPTY_HEADLINE_MESSAGE, HeadlinePredictor};
pub use types::{
    ClassProbs, LABEL_FAKE, LABEL_MAP, LABEL_REAL, LABEL_UNKNOWN, Prediction, label_for_class,
};
