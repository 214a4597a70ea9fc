use crate::report::RepairAction;

/// Result of stripping wrapper prose and code fences from a completion.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub text: String,
    /// Byte span of the retained body in the original text.
    pub span: (usize, usize),
    pub repairs: Vec<RepairAction>,
}

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

/// Locate a ```json ... ``` (or plain ```) fenced block and return the byte
/// span of its interior.
fn fenced_block(text: &str) -> Option<(usize, usize)> {
    let fence_start = text.find("```")?;
    let mut inner_start = fence_start + 3;
    let rest = &text.as_bytes()[inner_start..];
    if rest.len() >= 4 && rest[..4].eq_ignore_ascii_case(b"json") {
        inner_start += 4;
    }
    while inner_start < text.len() && is_ws(text.as_bytes()[inner_start]) {
        inner_start += 1;
    }
    let inner_end = inner_start + text[inner_start..].find("```")?;
    Some((inner_start, inner_end))
}

/// Walk a balanced `{`..`}` / `[`..`]` span starting at `start`, ignoring
/// structural bytes inside string literals. Returns the end of the span, or
/// end-of-input when the container never closes.
fn balanced_end(bytes: &[u8], start: usize) -> usize {
    let mut in_string = false;
    let mut escape = false;
    let mut depth: i64 = 0;
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
            i += 1;
            continue;
        }
        match ch {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Remove leading/trailing non-JSON wrapper content: Markdown fences first,
/// otherwise everything outside the balanced span beginning at the first
/// opener. When no opener exists the input is returned unchanged, with no
/// repairs, and the caller escalates.
pub fn strip_wrapper(text: &str) -> Extraction {
    if let Some((inner_start, inner_end)) = fenced_block(text) {
        let inner = text[inner_start..inner_end].trim_end();
        if inner.starts_with('{') || inner.starts_with('[') {
            let end = inner_start + inner.len();
            let mut repairs = vec![RepairAction::span("strip_code_fence", 0, text.len())];
            if inner_start > 0 {
                repairs.push(RepairAction::span("strip_prefix_text", 0, inner_start));
            }
            if end < text.len() {
                repairs.push(RepairAction::span("strip_suffix_text", end, text.len()));
            }
            return Extraction {
                text: inner.to_string(),
                span: (inner_start, end),
                repairs,
            };
        }
    }

    let start_obj = text.find('{');
    let start_arr = text.find('[');
    let start = match (start_obj, start_arr) {
        (None, None) => {
            return Extraction {
                text: text.to_string(),
                span: (0, text.len()),
                repairs: Vec::new(),
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (Some(a), Some(b)) => a.min(b),
    };

    let end = balanced_end(text.as_bytes(), start);
    let mut repairs = Vec::new();
    if start > 0 {
        repairs.push(RepairAction::span("strip_prefix_text", 0, start));
    }
    if end < text.len() {
        repairs.push(RepairAction::span("strip_suffix_text", end, text.len()));
    }
    Extraction {
        text: text[start..end].to_string(),
        span: (start, end),
        repairs,
    }
}
