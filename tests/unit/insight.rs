use super::*;

#[test]
fn prompt_embeds_diff_after_header() {
    let p = review_prompt("+a\n-b");
    assert!(p.starts_with("You are a code review assistant."));
    assert!(p.ends_with("Code Diff:\n\n+a\n-b"));
}

#[test]
fn extract_text_joins_parts_of_first_candidates() {
    let resp: GenerateResponse = serde_json::from_str(
        r#"{"candidates":[{"content":{"parts":[{"text":" Adds "},{"text":"a feature. "}]}}]}"#,
    )
    .unwrap();
    assert_eq!(extract_text(resp).unwrap(), "Adds a feature.");
}

#[test]
fn extract_text_rejects_empty_response() {
    let resp: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
    assert!(matches!(extract_text(resp), Err(VizError::Insight(_))));
}

#[test]
fn missing_api_key_is_rejected() {
    assert!(GeminiInsights::new(GeminiOpts::new("")).is_err());
}
