use serde::Serialize;

use crate::record::SummaryRecord;

/// One edit a transform made to the candidate text. Byte offsets refer to the
/// transform's input, not the original completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairAction {
    pub op: &'static str,
    pub span: Option<(usize, usize)>,
    pub at: Option<usize>,
    pub note: Option<String>,
}

impl RepairAction {
    pub fn at(op: &'static str, at: usize) -> Self {
        Self {
            op,
            span: None,
            at: Some(at),
            note: None,
        }
    }

    pub fn span(op: &'static str, start: usize, end: usize) -> Self {
        Self {
            op,
            span: Some((start, end)),
            at: None,
            note: None,
        }
    }
}

/// The recovery step that produced the returned record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Strict,
    StripWrapper,
    NormalizeQuotes,
    FlattenWhitespace,
    InsertArrayCommas,
    RemoveTrailingCommas,
    CloseContainers,
    Scavenge,
    Fallback,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Strict => "strict",
            Strategy::StripWrapper => "strip_wrapper",
            Strategy::NormalizeQuotes => "normalize_quotes",
            Strategy::FlattenWhitespace => "flatten_whitespace",
            Strategy::InsertArrayCommas => "insert_array_commas",
            Strategy::RemoveTrailingCommas => "remove_trailing_commas",
            Strategy::CloseContainers => "close_containers",
            Strategy::Scavenge => "scavenge",
            Strategy::Fallback => "fallback",
        }
    }
}

/// One failed decode attempt, kept for the diagnostic trace.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptTrace {
    pub strategy: Strategy,
    pub error: String,
}

/// Outcome of a recovery run: the record itself plus the advisory trace of
/// how it was obtained. The trace never changes control flow.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryReport {
    pub record: SummaryRecord,
    pub strategy: Strategy,
    pub repairs: Vec<RepairAction>,
    pub attempts: Vec<AttemptTrace>,
}
