use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use super::error::DatasetError;
use super::record::{Label, LabeledRow};

/// Column the `text` field is taken from.
pub const TITLE_COLUMN: &str = "title";

/// Reads a headered CSV and tags every row with `label`.
///
/// An empty `title` cell yields an empty `text`; the row is kept here and
/// dropped later by the token filter.
pub fn load_labeled_csv(path: &Path, label: Label) -> Result<Vec<LabeledRow>, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let csv_err = |source: csv::Error| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let title_idx = headers
        .iter()
        .position(|h| h.trim() == TITLE_COLUMN)
        .ok_or_else(|| DatasetError::MissingColumn {
            path: path.to_path_buf(),
            column: TITLE_COLUMN,
        })?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;

        let columns: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();

        rows.push(LabeledRow {
            text: record.get(title_idx).unwrap_or_default().to_string(),
            label,
            columns,
        });
    }

    debug!(path = %path.display(), %label, rows = rows.len(), "Loaded CSV");
    Ok(rows)
}
