use summary_recovery::{recover, recover_with_report, Strategy, SummaryRecord, FALLBACK_SUMMARY};

#[test]
fn valid_input_short_circuits_without_repairs() {
    let input = r#"{"summary": ["One", "Two"], "total": "2", "tone": "Formal"}"#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::Strict);
    assert!(report.repairs.is_empty());
    assert!(report.attempts.is_empty());
    assert_eq!(report.record.summary, vec!["One", "Two"]);
    assert_eq!(report.record.total, "2");
    assert_eq!(report.record.tone, "Formal");
}

#[test]
fn code_fence_wrapper_is_stripped() {
    let input = "Here is the summary:\n```json\n{\"summary\": [\"A\"], \"total\": \"1\", \"tone\": \"Neutral\"}\n```\nHope this helps!";
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::StripWrapper);
    assert_eq!(report.record.summary, vec!["A"]);
    assert!(report.repairs.iter().any(|r| r.op == "strip_code_fence"));
}

#[test]
fn missing_array_comma_is_inserted() {
    let input = r#"{"summary": ["First item" "Second item"], "total": "2", "tone": "Neutral"}"#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::InsertArrayCommas);
    assert_eq!(report.record.summary, vec!["First item", "Second item"]);
}

#[test]
fn trailing_comma_is_removed() {
    let input = r#"{"summary": ["Item 1", "Item 2", ], "total": "2", "tone": "Neutral"}"#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::RemoveTrailingCommas);
    assert_eq!(report.record.summary, vec!["Item 1", "Item 2"]);
}

#[test]
fn already_escaped_quotes_decode_directly() {
    let input = r#"{"summary": ["Text with \"double escaped\" quotes"], "total": "1", "tone": "Neutral"}"#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::Strict);
    assert_eq!(
        report.record.summary,
        vec![r#"Text with "double escaped" quotes"#]
    );
}

#[test]
fn unclosed_array_is_closed_and_missing_keys_default_filled() {
    // Bracket closure mends the array, but the mended object still lacks
    // `total` and `tone`, so manual extraction supplies the defaults.
    let input = r#"{"summary": ["a", "b""#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::Scavenge);
    assert_eq!(report.record.summary, vec!["a", "b"]);
    assert_eq!(report.record.total, "0");
    assert_eq!(report.record.tone, "Neutral");
}

#[test]
fn unclosed_object_with_full_keys_decodes_after_closure() {
    let input = r#"Sure! {"summary": ["a", "b"], "total": "2", "tone": "Formal""#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::CloseContainers);
    assert_eq!(report.record.summary, vec!["a", "b"]);
    assert_eq!(report.record.total, "2");
    assert_eq!(report.record.tone, "Formal");
    assert!(report.repairs.iter().any(|r| r.op == "strip_prefix_text"));
}

#[test]
fn interior_quotes_in_french_text_are_escaped() {
    let input = r#"{"summary": ["L'économie a "fortement" progressé", "Déficit réduit"], "total": "2", "tone": "Optimiste"}"#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::NormalizeQuotes);
    assert_eq!(
        report.record.summary,
        vec!["L'économie a \"fortement\" progressé", "Déficit réduit"]
    );
    assert_eq!(report.record.tone, "Optimiste");
}

#[test]
fn interior_quotes_in_cjk_text_are_escaped() {
    let input = r#"{"summary": ["经济"快速"增长", "出口持续增加"], "total": "2", "tone": "中性"}"#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::NormalizeQuotes);
    assert_eq!(report.record.summary, vec!["经济\"快速\"增长", "出口持续增加"]);
    assert_eq!(report.record.tone, "中性");
}

#[test]
fn unresolvable_quotes_without_known_keys_end_in_fallback() {
    let input = r#"{"tagline": "She said: "never", twice"}"#;
    let record = recover(input);
    assert_eq!(record, SummaryRecord::fallback());
    assert_eq!(record.summary, vec![FALLBACK_SUMMARY]);
    assert_eq!(record.total, "0");
    assert_eq!(record.tone, "Neutral");
}

#[test]
fn top_level_array_is_a_shape_failure() {
    let report = recover_with_report(r#"["a", "b"]"#);
    assert_eq!(report.strategy, Strategy::Fallback);
    assert!(report.attempts[0].error.contains("shape mismatch"));
    assert!(report.record.is_fallback());
}

#[test]
fn partially_recognizable_payload_is_scavenged() {
    let input = r#"Model note: {"total": "4", "tone": "Serious""#;
    let report = recover_with_report(input);
    assert_eq!(report.strategy, Strategy::Scavenge);
    assert!(report.record.summary.is_empty());
    assert_eq!(report.record.total, "4");
    assert_eq!(report.record.tone, "Serious");
}

#[test]
fn prose_without_any_structure_falls_back() {
    let record = recover("The article could not be summarized, sorry about that.");
    assert!(record.is_fallback());
}

#[test]
fn fallback_sentinel_matches_contract_exactly() {
    assert_eq!(
        FALLBACK_SUMMARY,
        "Error processing response. JSON parsing failed."
    );
    let fallback = SummaryRecord::fallback();
    assert_eq!(
        serde_json::to_value(&fallback).unwrap(),
        serde_json::json!({
            "summary": ["Error processing response. JSON parsing failed."],
            "total": "0",
            "tone": "Neutral"
        })
    );
}
