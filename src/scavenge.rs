use std::sync::LazyLock;

use regex::Regex;

use crate::record::{SummaryRecord, DEFAULT_TONE, DEFAULT_TOTAL};

static SUMMARY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""summary"\s*:\s*\["#).unwrap());

static TOTAL_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""total"\s*:\s*"?(\d+)"#).unwrap());

static TONE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""tone"\s*:\s*"?(\p{L}[^"\r\n,}\]]*)"#).unwrap());

static QUOTED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap());

/// Find the end of the summary array: the first `]` that is outside a string
/// literal, or end-of-input for a truncated array.
fn array_end(bytes: &[u8], start: usize) -> usize {
    let mut in_string = false;
    let mut escape = false;
    let mut i = start;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_string {
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
            }
        } else if ch == b'"' {
            in_string = true;
        } else if ch == b']' {
            return i;
        }
        i += 1;
    }
    bytes.len()
}

fn unescape_literal(quoted: &str, raw: &str) -> String {
    serde_json::from_str::<String>(quoted).unwrap_or_else(|_| raw.to_string())
}

/// Field-by-field extraction for payloads no transform could mend. Scans for
/// the three required keys with patterns that tolerate missing commas,
/// trailing commas and unterminated brackets; the first structurally
/// plausible match per key is authoritative. Returns `None` when not a
/// single field could be extracted.
pub fn scavenge(text: &str) -> Option<SummaryRecord> {
    let mut fields = 0usize;

    let summary = match SUMMARY_KEY.find(text) {
        Some(m) => {
            fields += 1;
            let start = m.end();
            let end = array_end(text.as_bytes(), start);
            QUOTED_ITEM
                .captures_iter(&text[start..end])
                .map(|c| unescape_literal(c.get(0).map_or("", |g| g.as_str()), &c[1]))
                .collect()
        }
        None => Vec::new(),
    };

    let total = match TOTAL_VALUE.captures(text) {
        Some(c) => {
            fields += 1;
            c[1].to_string()
        }
        None => DEFAULT_TOTAL.to_string(),
    };

    let tone = match TONE_VALUE.captures(text) {
        Some(c) => {
            fields += 1;
            c[1].trim_end().to_string()
        }
        None => DEFAULT_TONE.to_string(),
    };

    if fields == 0 {
        return None;
    }
    Some(SummaryRecord {
        summary,
        total,
        tone,
    })
}
