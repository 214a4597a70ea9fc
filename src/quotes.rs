use crate::report::RepairAction;

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

/// A quote closes the current string when the next significant byte can
/// legally follow a string literal. The bare `"` case covers an adjacent
/// literal whose separating comma is missing; comma insertion handles that
/// later in the chain.
fn closes_string(bytes: &[u8], quote_at: usize) -> bool {
    let mut i = quote_at + 1;
    while i < bytes.len() && is_ws(bytes[i]) {
        i += 1;
    }
    match bytes.get(i).copied() {
        None => true,
        Some(b) => matches!(b, b',' | b':' | b'}' | b']' | b'"'),
    }
}

/// Escape bare quotes that appear inside an already-open string value.
///
/// Structural open/close quotes, single-escaped quotes and the quote after a
/// double-escaped backslash are left untouched; only an interior quote that
/// would break the grammar is rewritten to `\"`. The decision looks solely at
/// delimiters, so the human language of the string content is irrelevant
/// (multi-byte UTF-8 sequences never collide with ASCII `"` or `\`).
pub fn escape_interior_quotes(text: &str) -> (String, Vec<RepairAction>) {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 8);
    let mut repairs = Vec::new();
    let mut in_string = false;
    let mut escape = false;
    for (i, &ch) in bytes.iter().enumerate() {
        if in_string {
            if escape {
                escape = false;
                out.push(ch);
            } else if ch == b'\\' {
                escape = true;
                out.push(ch);
            } else if ch == b'"' {
                if closes_string(bytes, i) {
                    in_string = false;
                    out.push(ch);
                } else {
                    out.extend_from_slice(b"\\\"");
                    repairs.push(RepairAction::at("escape_interior_quote", i));
                }
            } else {
                out.push(ch);
            }
            continue;
        }
        if ch == b'"' {
            in_string = true;
        }
        out.push(ch);
    }
    (String::from_utf8_lossy(&out).to_string(), repairs)
}
