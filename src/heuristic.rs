use crate::report::RepairAction;

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

/// Collapse whitespace runs outside string literals to a single space and
/// trim the ends. Newline-heavy completions often hide the structural bytes
/// the later transforms key on.
pub fn flatten_whitespace(text: &str) -> (String, Vec<RepairAction>) {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut in_string = false;
    let mut escape = false;
    let mut i = 0usize;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_string {
            out.push(ch);
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
        if ch == b'"' {
            in_string = true;
            out.push(ch);
            i += 1;
            continue;
        }
        if is_ws(ch) {
            while i < bytes.len() && is_ws(bytes[i]) {
                i += 1;
            }
            if !out.is_empty() && i < bytes.len() {
                out.push(b' ');
            }
            continue;
        }
        out.push(ch);
        i += 1;
    }
    let flattened = String::from_utf8_lossy(&out).to_string();
    if flattened == text {
        (flattened, Vec::new())
    } else {
        (flattened, vec![RepairAction::span("flatten_whitespace", 0, text.len())])
    }
}

/// Insert the comma missing between two consecutive quoted string literals
/// in an array context. Object contexts are left alone: there a bare quoted
/// pair means a missing colon, a different malformation.
pub fn insert_array_commas(text: &str) -> (String, Vec<RepairAction>) {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 4);
    let mut repairs = Vec::new();
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escape = false;
    let mut after_string_close = false;
    for (i, &ch) in bytes.iter().enumerate() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
                after_string_close = true;
            }
            continue;
        }
        if ch == b'"' {
            if after_string_close && stack.last() == Some(&b'[') {
                out.push(b',');
                repairs.push(RepairAction::at("insert_array_comma", i));
            }
            in_string = true;
            after_string_close = false;
            out.push(ch);
            continue;
        }
        if !is_ws(ch) {
            after_string_close = false;
            match ch {
                b'{' | b'[' => stack.push(ch),
                b'}' | b']' => {
                    stack.pop();
                }
                _ => {}
            }
        }
        out.push(ch);
    }
    (String::from_utf8_lossy(&out).to_string(), repairs)
}

/// Remove a comma immediately followed (ignoring whitespace) by a closing
/// `]` or `}` or end-of-input.
pub fn remove_trailing_commas(text: &str) -> (String, Vec<RepairAction>) {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut repairs = Vec::new();
    let mut in_string = false;
    let mut escape = false;
    let mut i = 0usize;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_string {
            out.push(ch);
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
        if ch == b'"' {
            in_string = true;
            out.push(ch);
            i += 1;
            continue;
        }
        if ch == b',' {
            // Skip past whole comma runs so `,,]` cleans up in one pass.
            let mut j = i + 1;
            while j < bytes.len() && (is_ws(bytes[j]) || bytes[j] == b',') {
                j += 1;
            }
            if j >= bytes.len() || bytes[j] == b'}' || bytes[j] == b']' {
                repairs.push(RepairAction::at("remove_trailing_comma", i));
                i += 1;
                continue;
            }
        }
        out.push(ch);
        i += 1;
    }
    (String::from_utf8_lossy(&out).to_string(), repairs)
}

/// Close containers left open at end-of-input, in reverse nesting order. An
/// unterminated string is closed first so the appended closers land outside
/// it. Unmatched closers already present are skipped rather than popped, so
/// the repair never rebalances interior damage it cannot see past.
pub fn close_containers(text: &str) -> (String, Vec<RepairAction>) {
    let bytes = text.as_bytes();
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escape = false;
    for &ch in bytes {
        if in_string {
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            b'"' => in_string = true,
            b'{' | b'[' => stack.push(ch),
            b'}' => {
                if stack.last() == Some(&b'{') {
                    stack.pop();
                }
            }
            b']' => {
                if stack.last() == Some(&b'[') {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    if !in_string && stack.is_empty() {
        return (text.to_string(), Vec::new());
    }

    let mut out = text.to_string();
    let mut repairs = Vec::new();
    if in_string {
        out.push('"');
        repairs.push(RepairAction::at("close_open_string", text.len()));
    }
    if !stack.is_empty() {
        let closers: String = stack
            .iter()
            .rev()
            .map(|&b| if b == b'{' { '}' } else { ']' })
            .collect();
        out.push_str(&closers);
        let mut action = RepairAction::at("close_containers", text.len());
        action.note = Some(closers);
        repairs.push(action);
    }
    (out, repairs)
}
