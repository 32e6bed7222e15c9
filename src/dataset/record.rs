use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Source label of a row. Serialises lowercase (`"fake"` / `"real"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Fake,
    Real,
}

impl Label {
    /// Both labels, in merge order.
    pub const ALL: [Label; 2] = [Label::Fake, Label::Real];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Fake => "fake",
            Label::Real => "real",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One CSV row tagged with its source label.
///
/// `text` is the `title` cell; `columns` keeps every cell of the original row
/// keyed by header.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub text: String,
    pub label: Label,
    pub columns: BTreeMap<String, String>,
}

impl LabeledRow {
    /// Row with only a title, as used by tests and callers without extra columns.
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
            columns: BTreeMap::new(),
        }
    }

    /// Whitespace-separated token count of `text`.
    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Line written to the JSONL outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub text: String,
    pub label: Label,
}

impl From<&LabeledRow> for DatasetRecord {
    fn from(row: &LabeledRow) -> Self {
        Self {
            text: row.text.clone(),
            label: row.label,
        }
    }
}
