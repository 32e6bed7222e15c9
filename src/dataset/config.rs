use std::path::PathBuf;

use crate::constants::{
    DEFAULT_FAKE_CSV, DEFAULT_MIN_TOKENS, DEFAULT_OUTPUT_DIR, DEFAULT_REAL_CSV, DEFAULT_SPLIT_SEED,
};

use super::error::DatasetError;

pub const TRAIN_FILE: &str = "train.jsonl";
pub const VAL_FILE: &str = "val.jsonl";
pub const TEST_FILE: &str = "test.jsonl";

const RATIO_SUM_TOLERANCE: f64 = 1e-6;

/// Train/validation/test proportions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.8,
            val: 0.1,
            test: 0.1,
        }
    }
}

impl SplitRatios {
    /// Each ratio must lie in `(0, 1)` and together they must sum to one.
    pub fn validate(&self) -> Result<(), DatasetError> {
        for (name, value) in [("train", self.train), ("val", self.val), ("test", self.test)] {
            if !value.is_finite() || value <= 0.0 || value >= 1.0 {
                return Err(DatasetError::InvalidRatios {
                    reason: format!("{} ratio must be in (0, 1), got {}", name, value),
                });
            }
        }

        let sum = self.train + self.val + self.test;
        if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(DatasetError::InvalidRatios {
                reason: format!("ratios sum to {}, expected 1", sum),
            });
        }

        Ok(())
    }

    /// Share of rows held out of training.
    pub fn holdout(&self) -> f64 {
        self.val + self.test
    }
}

/// Inputs, outputs and knobs of a dataset preparation run.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub fake_csv: PathBuf,
    pub real_csv: PathBuf,
    pub output_dir: PathBuf,
    pub train_ratio: f64,
    pub val_ratio: f64,
    pub test_ratio: f64,
    /// Rows whose title has fewer whitespace tokens are dropped.
    pub min_tokens: usize,
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        let ratios = SplitRatios::default();
        Self {
            fake_csv: PathBuf::from(DEFAULT_FAKE_CSV),
            real_csv: PathBuf::from(DEFAULT_REAL_CSV),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            train_ratio: ratios.train,
            val_ratio: ratios.val,
            test_ratio: ratios.test,
            min_tokens: DEFAULT_MIN_TOKENS,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

impl DatasetConfig {
    pub fn ratios(&self) -> SplitRatios {
        SplitRatios {
            train: self.train_ratio,
            val: self.val_ratio,
            test: self.test_ratio,
        }
    }

    pub fn train_path(&self) -> PathBuf {
        self.output_dir.join(TRAIN_FILE)
    }

    pub fn val_path(&self) -> PathBuf {
        self.output_dir.join(VAL_FILE)
    }

    pub fn test_path(&self) -> PathBuf {
        self.output_dir.join(TEST_FILE)
    }
}
