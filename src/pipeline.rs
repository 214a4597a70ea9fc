use crate::decode::{strict_decode, DecodeFailure};
use crate::extract::strip_wrapper;
use crate::heuristic::{
    close_containers, flatten_whitespace, insert_array_commas, remove_trailing_commas,
};
use crate::quotes::escape_interior_quotes;
use crate::record::SummaryRecord;
use crate::report::{AttemptTrace, RecoveryReport, RepairAction, Strategy};
use crate::scavenge::scavenge;

type Transform = fn(&str) -> (String, Vec<RepairAction>);

/// Trailing cleanup chain, least invasive first. Each entry is attempted on
/// the previous entry's output, with a decode attempt after each edit; new
/// strategies slot in here without touching the loop below.
const CLEANUP_CHAIN: &[(Strategy, Transform)] = &[
    (Strategy::FlattenWhitespace, flatten_whitespace),
    (Strategy::InsertArrayCommas, insert_array_commas),
    (Strategy::RemoveTrailingCommas, remove_trailing_commas),
    (Strategy::CloseContainers, close_containers),
];

/// Recover a [`SummaryRecord`] from a raw completion. Always returns a
/// record; total failure yields [`SummaryRecord::fallback`].
pub fn recover(raw: &str) -> SummaryRecord {
    recover_with_report(raw).record
}

/// Like [`recover`], but also reports the winning strategy, the repairs
/// applied on the way, and every decode failure seen. The report is
/// advisory; callers that only want the record should use [`recover`].
pub fn recover_with_report(raw: &str) -> RecoveryReport {
    let mut attempts: Vec<AttemptTrace> = Vec::new();

    match strict_decode(raw) {
        Ok(record) => {
            tracing::info!(strategy = Strategy::Strict.name(), "completion decoded directly");
            return RecoveryReport {
                record,
                strategy: Strategy::Strict,
                repairs: Vec::new(),
                attempts,
            };
        }
        Err(failure) => note_failure(&mut attempts, Strategy::Strict, failure),
    }

    let extraction = strip_wrapper(raw);
    let mut repairs = extraction.repairs;
    let stripped = extraction.text;
    if !repairs.is_empty() {
        match strict_decode(&stripped) {
            Ok(record) => return won(Strategy::StripWrapper, record, repairs, attempts),
            Err(failure) => note_failure(&mut attempts, Strategy::StripWrapper, failure),
        }
    }

    let (normalized, quote_repairs) = escape_interior_quotes(&stripped);
    if !quote_repairs.is_empty() {
        repairs.extend(quote_repairs);
        match strict_decode(&normalized) {
            Ok(record) => return won(Strategy::NormalizeQuotes, record, repairs, attempts),
            Err(failure) => note_failure(&mut attempts, Strategy::NormalizeQuotes, failure),
        }
    }

    let mut candidate = normalized;
    for (strategy, transform) in CLEANUP_CHAIN {
        let (edited, edit_repairs) = transform(&candidate);
        if edit_repairs.is_empty() {
            continue;
        }
        repairs.extend(edit_repairs);
        candidate = edited;
        match strict_decode(&candidate) {
            Ok(record) => return won(*strategy, record, repairs, attempts),
            Err(failure) => note_failure(&mut attempts, *strategy, failure),
        }
    }

    // Manual extraction runs on the fully repaired candidate: interior
    // quotes are escaped by this point, so the quoted-item pattern consumes
    // them correctly.
    if let Some(record) = scavenge(&candidate) {
        return won(Strategy::Scavenge, record, repairs, attempts);
    }

    tracing::warn!("all recovery strategies failed, returning fallback record");
    RecoveryReport {
        record: SummaryRecord::fallback(),
        strategy: Strategy::Fallback,
        repairs,
        attempts,
    }
}

fn note_failure(attempts: &mut Vec<AttemptTrace>, strategy: Strategy, failure: DecodeFailure) {
    tracing::debug!(strategy = strategy.name(), error = %failure, "decode attempt failed");
    attempts.push(AttemptTrace {
        strategy,
        error: failure.to_string(),
    });
}

fn won(
    strategy: Strategy,
    record: SummaryRecord,
    repairs: Vec<RepairAction>,
    attempts: Vec<AttemptTrace>,
) -> RecoveryReport {
    tracing::info!(
        strategy = strategy.name(),
        repairs = repairs.len(),
        "recovery succeeded"
    );
    RecoveryReport {
        record,
        strategy,
        repairs,
        attempts,
    }
}
