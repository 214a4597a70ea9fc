use serde_json::Value;
use thiserror::Error;

use crate::record::SummaryRecord;

/// Why a candidate text was rejected. Drives escalation to the next repair
/// strategy; never surfaced to callers of the public API.
#[derive(Debug, Error)]
pub enum DecodeFailure {
    #[error("invalid json: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("shape mismatch: {0}")]
    Shape(String),
}

/// Strict decode: the text must parse as JSON and carry all three required
/// keys with the right element types. A wrong top-level shape escalates
/// exactly like a syntax error.
pub fn strict_decode(text: &str) -> Result<SummaryRecord, DecodeFailure> {
    let value: Value = serde_json::from_str(text)?;
    record_from_value(&value)
}

fn record_from_value(value: &Value) -> Result<SummaryRecord, DecodeFailure> {
    let obj = value
        .as_object()
        .ok_or_else(|| DecodeFailure::Shape("top-level value is not an object".to_string()))?;

    let summary = match obj.get("summary") {
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(s) => out.push(s.to_string()),
                    None => {
                        return Err(DecodeFailure::Shape(format!(
                            "`summary[{i}]` is not a string"
                        )))
                    }
                }
            }
            out
        }
        Some(_) => return Err(DecodeFailure::Shape("`summary` is not an array".to_string())),
        None => return Err(DecodeFailure::Shape("missing key `summary`".to_string())),
    };

    let total = require_string(obj, "total")?;
    let tone = require_string(obj, "tone")?;

    Ok(SummaryRecord {
        summary,
        total,
        tone,
    })
}

fn require_string(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<String, DecodeFailure> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DecodeFailure::Shape(format!("`{key}` is not a string"))),
        None => Err(DecodeFailure::Shape(format!("missing key `{key}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record_decodes() {
        let record =
            strict_decode(r#"{"summary": ["a"], "total": "1", "tone": "Neutral"}"#).unwrap();
        assert_eq!(record.summary, vec!["a"]);
        assert_eq!(record.total, "1");
    }

    #[test]
    fn extra_keys_are_tolerated() {
        let record = strict_decode(
            r#"{"summary": [], "total": "0", "tone": "Neutral", "model": "gpt-4o"}"#,
        )
        .unwrap();
        assert!(record.summary.is_empty());
    }

    #[test]
    fn syntax_and_shape_failures_are_distinct() {
        assert!(matches!(
            strict_decode(r#"{"summary": ["a""#),
            Err(DecodeFailure::Syntax(_))
        ));
        assert!(matches!(
            strict_decode(r#"["a"]"#),
            Err(DecodeFailure::Shape(_))
        ));
        assert!(matches!(
            strict_decode(r#"{"summary": ["a"], "total": "1"}"#),
            Err(DecodeFailure::Shape(_))
        ));
        assert!(matches!(
            strict_decode(r#"{"summary": [1], "total": "1", "tone": "Neutral"}"#),
            Err(DecodeFailure::Shape(_))
        ));
        assert!(matches!(
            strict_decode(r#"{"summary": [], "total": 3, "tone": "Neutral"}"#),
            Err(DecodeFailure::Shape(_))
        ));
    }
}
