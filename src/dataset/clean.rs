use std::collections::HashSet;

use super::record::LabeledRow;

/// Concatenates both sources, fake rows first.
pub fn merge(fake: Vec<LabeledRow>, real: Vec<LabeledRow>) -> Vec<LabeledRow> {
    let mut rows = fake;
    rows.extend(real);
    rows
}

/// Keeps the first row for each exact `text` value.
pub fn dedup_by_text(rows: Vec<LabeledRow>) -> Vec<LabeledRow> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(row.text.clone()))
        .collect()
}

/// Keeps rows with at least `min_tokens` whitespace-separated tokens.
pub fn filter_min_tokens(rows: Vec<LabeledRow>, min_tokens: usize) -> Vec<LabeledRow> {
    rows.into_iter()
        .filter(|row| row.token_count() >= min_tokens)
        .collect()
}
