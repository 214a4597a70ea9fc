use serde::{Deserialize, Serialize};

/// Sentinel summary line of the fallback record. Downstream consumers match
/// this text byte-for-byte to detect total recovery failure, so it must never
/// be rephrased.
pub const FALLBACK_SUMMARY: &str = "Error processing response. JSON parsing failed.";

/// Default `total` when the field could not be extracted.
pub const DEFAULT_TOTAL: &str = "0";

/// Default `tone` when the field could not be extracted.
pub const DEFAULT_TONE: &str = "Neutral";

/// The normalized record the rendering stage consumes: `summary` entries are
/// per-slide highlighted text, `total` is a slide-count hint, `tone` a styling
/// hint. All three keys are always present and well-typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub summary: Vec<String>,
    pub total: String,
    pub tone: String,
}

impl SummaryRecord {
    /// The record returned when every repair strategy and every decode
    /// attempt has failed.
    pub fn fallback() -> Self {
        Self {
            summary: vec![FALLBACK_SUMMARY.to_string()],
            total: DEFAULT_TOTAL.to_string(),
            tone: DEFAULT_TONE.to_string(),
        }
    }

    /// True when this record is the failure sentinel.
    pub fn is_fallback(&self) -> bool {
        self.summary.len() == 1 && self.summary[0] == FALLBACK_SUMMARY
    }
}
