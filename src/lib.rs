pub mod decode;
pub mod extract;
pub mod heuristic;
pub mod pipeline;
pub mod quotes;
pub mod record;
pub mod report;
pub mod scavenge;

pub use pipeline::{recover, recover_with_report};
pub use record::{SummaryRecord, DEFAULT_TONE, DEFAULT_TOTAL, FALLBACK_SUMMARY};
pub use report::{AttemptTrace, RecoveryReport, RepairAction, Strategy};
