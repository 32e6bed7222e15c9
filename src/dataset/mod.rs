//! Dataset preparation: two labeled CSVs in, three JSONL partitions out.
//!
//! The pipeline is load → merge → dedup → token filter → stratified split →
//! write. Everything up to the split runs before the output directory is
//! touched, so a failing run leaves no new files behind.

pub mod clean;
pub mod config;
pub mod error;
pub mod jsonl;
pub mod loader;
pub mod record;
pub mod split;


pub use clean::{dedup_by_text, filter_min_tokens, merge};
pub use config::{DatasetConfig, SplitRatios, TEST_FILE, TRAIN_FILE, VAL_FILE};
pub use error::DatasetError;
pub use jsonl::{read_jsonl, write_jsonl};
pub use loader::{TITLE_COLUMN, load_labeled_csv};
pub use record::{DatasetRecord, Label, LabeledRow};
pub use split::{Split, class_partition_sizes, stratified_split};

use serde::Serialize;
use tracing::info;

/// Row and class counts for one partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartitionStats {
    pub rows: usize,
    pub fake: usize,
    pub real: usize,
}

impl PartitionStats {
    pub fn from_rows(rows: &[LabeledRow]) -> Self {
        let fake = rows.iter().filter(|r| r.label == Label::Fake).count();
        Self {
            rows: rows.len(),
            fake,
            real: rows.len() - fake,
        }
    }

    /// Share of `real` rows, `0.0` for an empty partition.
    pub fn real_ratio(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.real as f64 / self.rows as f64
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct PrepareReport {
    /// Rows read from both CSVs.
    pub input_rows: usize,
    pub after_dedup: usize,
    pub after_filter: usize,
    pub overall: PartitionStats,
    pub train: PartitionStats,
    pub val: PartitionStats,
    pub test: PartitionStats,
}

/// Runs the whole pipeline and writes `train.jsonl`, `val.jsonl` and `test.jsonl`.
pub fn prepare(config: &DatasetConfig) -> Result<PrepareReport, DatasetError> {
    let ratios = config.ratios();
    ratios.validate()?;

    let fake = load_labeled_csv(&config.fake_csv, Label::Fake)?;
    let real = load_labeled_csv(&config.real_csv, Label::Real)?;
    info!(fake = fake.len(), real = real.len(), "Loaded raw datasets");

    let rows = merge(fake, real);
    let input_rows = rows.len();
    if rows.is_empty() {
        return Err(DatasetError::EmptyInput {
            reason: "both input files are empty".to_string(),
        });
    }

    let rows = dedup_by_text(rows);
    let after_dedup = rows.len();
    let rows = filter_min_tokens(rows, config.min_tokens);
    let after_filter = rows.len();
    info!(
        input_rows,
        after_dedup,
        after_filter,
        min_tokens = config.min_tokens,
        "Cleaned rows"
    );

    if rows.is_empty() {
        return Err(DatasetError::EmptyInput {
            reason: format!("every title has fewer than {} tokens", config.min_tokens),
        });
    }
    for label in Label::ALL {
        if !rows.iter().any(|r| r.label == label) {
            return Err(DatasetError::MissingClass { label });
        }
    }

    let overall = PartitionStats::from_rows(&rows);
    let split = stratified_split(rows, &ratios, config.seed)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|source| DatasetError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    write_jsonl(&config.train_path(), &split.train)?;
    write_jsonl(&config.val_path(), &split.val)?;
    write_jsonl(&config.test_path(), &split.test)?;

    let report = PrepareReport {
        input_rows,
        after_dedup,
        after_filter,
        overall,
        train: PartitionStats::from_rows(&split.train),
        val: PartitionStats::from_rows(&split.val),
        test: PartitionStats::from_rows(&split.test),
    };

    for (name, stats) in [
        ("train", report.train),
        ("val", report.val),
        ("test", report.test),
    ] {
        info!(
            partition = name,
            rows = stats.rows,
            fake = stats.fake,
            real = stats.real,
            real_ratio = stats.real_ratio(),
            "Wrote partition"
        );
    }
    info!(output_dir = %config.output_dir.display(), "Dataset prepared");

    Ok(report)
}
