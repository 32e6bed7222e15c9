use std::path::PathBuf;
use thiserror::Error;

use super::record::Label;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("no rows left to split: {reason}")]
    EmptyInput { reason: String },

    #[error("no '{label}' rows left after cleaning")]
    MissingClass { label: Label },

    #[error(
        "class '{label}' has {available} rows, too few to give the {partition} partition at least one"
    )]
    InsufficientClassMembers {
        label: Label,
        partition: &'static str,
        available: usize,
    },

    #[error("invalid split ratios: {reason}")]
    InvalidRatios { reason: String },

    #[error("failed to write record to {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}:{line}: malformed record: {source}")]
    Deserialize {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
