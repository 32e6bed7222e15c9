//! Trained classifier head applied to headline embeddings.
//!
//! The training step exports a linear model as safetensors (`coef`,
//! `intercept`, optional `classes`); [`LinearClassifier`] loads it and yields a
//! two-column probability distribution plus the predicted class index.

pub mod error;
pub mod linear;


pub use error::ClassifierError;
pub use linear::{
    CLASSES_TENSOR, COEF_TENSOR, DEFAULT_CLASSES, INTERCEPT_TENSOR, LinearClassifier,
};
