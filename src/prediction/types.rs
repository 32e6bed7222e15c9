use serde::{Deserialize, Serialize};

/// Label reported for the `0` class.
pub const LABEL_FAKE: &str = "fake";
/// Label reported for the `1` class.
pub const LABEL_REAL: &str = "real";
/// Label reported when the classifier yields an index outside [`LABEL_MAP`].
pub const LABEL_UNKNOWN: &str = "unknown";

/// Class index → label table shared with the training step.
pub const LABEL_MAP: [(i64, &str); 2] = [(1, LABEL_REAL), (0, LABEL_FAKE)];

/// Looks up the label for a class index.
pub fn label_for_class(class: i64) -> Option<&'static str> {
    LABEL_MAP
        .iter()
        .find(|(index, _)| *index == class)
        .map(|(_, label)| *label)
}

/// Per-class probabilities. Serialises as `{"fake": .., "real": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbs {
    /// Probability of the first classifier column.
    pub fake: f64,
    /// Probability of the second classifier column.
    pub real: f64,
}

impl ClassProbs {
    /// Probability entry for a label, `None` for labels outside the table.
    pub fn get(&self, label: &str) -> Option<f64> {
        match label {
            LABEL_FAKE => Some(self.fake),
            LABEL_REAL => Some(self.real),
            _ => None,
        }
    }
}

impl From<[f64; 2]> for ClassProbs {
    fn from(probs: [f64; 2]) -> Self {
        Self {
            fake: probs[0],
            real: probs[1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Outcome of classifying one headline.
pub struct Prediction {
    /// `"real"`, `"fake"`, or `"unknown"` for an unmapped class index.
    pub label: String,
    /// Probability of the predicted label.
    pub score: f64,
    /// Full distribution.
    pub probs: ClassProbs,
}

impl Prediction {
    /// Returns `true` unless the classifier produced an unmapped class.
    pub fn is_known(&self) -> bool {
        self.label != LABEL_UNKNOWN
    }
}
