use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use tracing::info;

use super::error::ClassifierError;

/// Weight matrix, `[k, d]` with `k` in `{1, 2}`.
pub const COEF_TENSOR: &str = "coef";
/// Bias per weight row, `[k]`.
pub const INTERCEPT_TENSOR: &str = "intercept";
/// Class index per probability column, `[2]` (optional).
pub const CLASSES_TENSOR: &str = "classes";

/// Class indices assumed when the weights file carries none.
pub const DEFAULT_CLASSES: [i64; 2] = [0, 1];

/// Logistic-regression head over sentence embeddings.
///
/// A single weight row is a binary model (`p1 = sigmoid(w·x + b)`); two rows are
/// a multinomial model (softmax). Either way the output is a two-column
/// distribution whose columns map to [`LinearClassifier::classes`].
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
    classes: [i64; 2],
}

impl LinearClassifier {
    /// Builds a classifier from raw weights, checking shapes.
    pub fn from_parts(
        coef: Vec<Vec<f32>>,
        intercept: Vec<f32>,
        classes: Vec<i64>,
    ) -> Result<Self, ClassifierError> {
        if coef.is_empty() || coef.len() > 2 {
            return Err(ClassifierError::InvalidShape {
                reason: format!(
                    "expected 1 (binary) or 2 (multinomial) weight rows, got {}",
                    coef.len()
                ),
            });
        }

        let input_dim = coef[0].len();
        if input_dim == 0 {
            return Err(ClassifierError::InvalidShape {
                reason: "weight rows are empty".to_string(),
            });
        }
        if coef.iter().any(|row| row.len() != input_dim) {
            return Err(ClassifierError::InvalidShape {
                reason: "weight rows differ in length".to_string(),
            });
        }
        if intercept.len() != coef.len() {
            return Err(ClassifierError::InvalidShape {
                reason: format!(
                    "intercept has {} entries for {} weight rows",
                    intercept.len(),
                    coef.len()
                ),
            });
        }
        if coef.iter().flatten().chain(&intercept).any(|w| !w.is_finite()) {
            return Err(ClassifierError::InvalidShape {
                reason: "weights contain NaN or infinity".to_string(),
            });
        }

        let classes: [i64; 2] =
            classes
                .try_into()
                .map_err(|found: Vec<i64>| ClassifierError::InvalidShape {
                    reason: format!("expected exactly 2 classes, got {}", found.len()),
                })?;

        Ok(Self {
            coef,
            intercept,
            classes,
        })
    }

    /// Loads `coef` / `intercept` / `classes` tensors from a safetensors file.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        if !path.is_file() {
            return Err(ClassifierError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let tensors = candle_core::safetensors::load(path, &Device::Cpu)?;

        let coef = required(&tensors, COEF_TENSOR)?.to_dtype(DType::F32)?;
        let coef: Vec<Vec<f32>> = match coef.rank() {
            1 => vec![coef.to_vec1()?],
            2 => coef.to_vec2()?,
            rank => {
                return Err(ClassifierError::InvalidShape {
                    reason: format!("'{}' must be rank 1 or 2, got rank {}", COEF_TENSOR, rank),
                });
            }
        };

        let intercept: Vec<f32> = required(&tensors, INTERCEPT_TENSOR)?
            .flatten_all()?
            .to_dtype(DType::F32)?
            .to_vec1()?;

        let classes: Vec<i64> = match tensors.get(CLASSES_TENSOR) {
            Some(t) => t.flatten_all()?.to_dtype(DType::I64)?.to_vec1()?,
            None => DEFAULT_CLASSES.to_vec(),
        };

        let classifier = Self::from_parts(coef, intercept, classes)?;

        info!(
            path = %path.display(),
            input_dim = classifier.input_dim(),
            weight_rows = classifier.coef.len(),
            classes = ?classifier.classes,
            "Classifier loaded"
        );

        Ok(classifier)
    }

    /// Expected embedding width.
    pub fn input_dim(&self) -> usize {
        self.coef[0].len()
    }

    /// Class index of each probability column.
    pub fn classes(&self) -> [i64; 2] {
        self.classes
    }

    /// Raw scores `w·x + b`, one per weight row.
    pub fn decision_function(&self, embedding: &[f32]) -> Result<Vec<f64>, ClassifierError> {
        if embedding.len() != self.input_dim() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.input_dim(),
                actual: embedding.len(),
            });
        }

        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| {
                row.iter()
                    .zip(embedding)
                    .map(|(w, x)| f64::from(*w) * f64::from(*x))
                    .sum::<f64>()
                    + f64::from(*bias)
            })
            .collect())
    }

    /// Two-column probability distribution, columns ordered as [`Self::classes`].
    pub fn predict_proba(&self, embedding: &[f32]) -> Result<[f64; 2], ClassifierError> {
        let scores = self.decision_function(embedding)?;

        match scores.as_slice() {
            [z] => {
                let p1 = sigmoid(*z);
                Ok([1.0 - p1, p1])
            }
            [z0, z1] => {
                let max = z0.max(*z1);
                let e0 = (z0 - max).exp();
                let e1 = (z1 - max).exp();
                let total = e0 + e1;
                Ok([e0 / total, e1 / total])
            }
            other => Err(ClassifierError::InvalidShape {
                reason: format!("expected 1 or 2 decision scores, got {}", other.len()),
            }),
        }
    }

    /// Class index of the most probable column (ties resolve to the first column).
    pub fn predict(&self, embedding: &[f32]) -> Result<i64, ClassifierError> {
        let probs = self.predict_proba(embedding)?;
        Ok(self.classes[argmax(&probs)])
    }

    /// Serialises the weights in the layout [`Self::load`] reads.
    pub fn save(&self, path: &Path) -> Result<(), ClassifierError> {
        let device = Device::Cpu;
        let rows = self.coef.len();
        let flat: Vec<f32> = self.coef.iter().flatten().copied().collect();

        let mut tensors = HashMap::new();
        tensors.insert(
            COEF_TENSOR,
            Tensor::from_vec(flat, (rows, self.input_dim()), &device)?,
        );
        tensors.insert(
            INTERCEPT_TENSOR,
            Tensor::from_vec(self.intercept.clone(), rows, &device)?,
        );
        tensors.insert(
            CLASSES_TENSOR,
            Tensor::from_vec(self.classes.to_vec(), 2, &device)?,
        );

        candle_core::safetensors::save(&tensors, path)?;
        Ok(())
    }
}

/// Index of the larger of two probabilities; equal values pick index 0.
pub(crate) fn argmax(probs: &[f64; 2]) -> usize {
    if probs[1] > probs[0] { 1 } else { 0 }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn required<'a>(
    tensors: &'a HashMap<String, Tensor>,
    name: &'static str,
) -> Result<&'a Tensor, ClassifierError> {
    tensors
        .get(name)
        .ok_or(ClassifierError::MissingTensor { name })
}

#[cfg(any(test, feature = "mock"))]
impl LinearClassifier {
    /// Deterministic binary classifier for tests (no weights file needed).
    pub fn stub(input_dim: usize) -> Self {
        let row = (0..input_dim.max(1))
            .map(|i| ((i % 7) as f32 - 3.0) * 0.1)
            .collect();

        Self {
            coef: vec![row],
            intercept: vec![0.05],
            classes: DEFAULT_CLASSES,
        }
    }
}
