use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::config::SplitRatios;
use super::error::DatasetError;
use super::record::{Label, LabeledRow};

/// Train/validation/test partitions.
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train: Vec<LabeledRow>,
    pub val: Vec<LabeledRow>,
    pub test: Vec<LabeledRow>,
}

impl Split {
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-class partition sizes for a class of `n` rows.
///
/// Two stages: `holdout = round(n * (val + test))` leaves training, then
/// `test = round(holdout * test / (val + test))` and the rest is validation.
pub fn class_partition_sizes(n: usize, ratios: &SplitRatios) -> (usize, usize, usize) {
    let holdout = ((n as f64 * ratios.holdout()).round() as usize).min(n);
    let test = ((holdout as f64 * ratios.test / ratios.holdout()).round() as usize).min(holdout);
    let val = holdout - test;
    (n - holdout, val, test)
}

/// Stratified, seeded split.
///
/// Rows are grouped by label, each group is shuffled with a `ChaCha8Rng`
/// seeded from `seed`, cut per [`class_partition_sizes`], and each partition is
/// shuffled once more so classes are interleaved. Same input and seed give the
/// same output.
pub fn stratified_split(
    rows: Vec<LabeledRow>,
    ratios: &SplitRatios,
    seed: u64,
) -> Result<Split, DatasetError> {
    ratios.validate()?;

    let mut groups: BTreeMap<Label, Vec<LabeledRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.label).or_default().push(row);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut split = Split::default();

    for (label, mut group) in groups {
        let available = group.len();
        let (n_train, n_val, n_test) = class_partition_sizes(available, ratios);

        for (partition, count) in [("train", n_train), ("val", n_val), ("test", n_test)] {
            if count == 0 {
                return Err(DatasetError::InsufficientClassMembers {
                    label,
                    partition,
                    available,
                });
            }
        }

        group.shuffle(&mut rng);
        let mut rest = group.split_off(n_test);
        let test = group;
        let train = rest.split_off(n_val);
        let val = rest;

        debug!(%label, train = n_train, val = n_val, test = n_test, "Class split");

        split.train.extend(train);
        split.val.extend(val);
        split.test.extend(test);
    }

    split.train.shuffle(&mut rng);
    split.val.shuffle(&mut rng);
    split.test.shuffle(&mut rng);

    Ok(split)
}
