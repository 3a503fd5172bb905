use kuching::application::services::{DelimiterPair, ResponseExtractor};

fn extractor() -> ResponseExtractor {
    ResponseExtractor::new(DelimiterPair::default()).unwrap()
}

#[test]
fn given_single_pair_when_extracting_then_returns_trimmed_inner_text() {
    let result = extractor().extract("noise <response>  the answer  </response> more noise");
    assert_eq!(result, Some("the answer".to_string()));
}

#[test]
fn given_no_pair_when_extracting_then_returns_none() {
    assert_eq!(extractor().extract("no tags anywhere"), None);
}

#[test]
fn given_empty_text_when_extracting_then_returns_none() {
    assert_eq!(extractor().extract(""), None);
}

#[test]
fn given_empty_inner_text_when_extracting_then_returns_none() {
    assert_eq!(extractor().extract("<response>   </response>"), None);
}

#[test]
fn given_unclosed_tag_when_extracting_then_returns_none() {
    assert_eq!(extractor().extract("<response>half an answer"), None);
}

#[test]
fn given_multiple_pairs_when_extracting_then_joins_non_empty_in_order() {
    let text = "<response>first</response> filler <response>  </response> <response>second</response>";
    assert_eq!(
        extractor().extract(text),
        Some("first second".to_string())
    );
}

#[test]
fn given_only_empty_pairs_when_extracting_then_returns_none() {
    assert_eq!(
        extractor().extract("<response> </response><response></response>"),
        None
    );
}

#[test]
fn given_mixed_case_tags_when_extracting_then_matches_case_insensitively() {
    let result = extractor().extract("<RESPONSE>shouty answer</Response>");
    assert_eq!(result, Some("shouty answer".to_string()));
}

#[test]
fn given_multiline_content_when_extracting_then_span_crosses_lines() {
    let result = extractor().extract("<response>line one\nline two</response>");
    assert_eq!(result, Some("line one\nline two".to_string()));
}

#[test]
fn given_nested_tag_inside_span_when_extracting_then_content_returned_as_is() {
    // Lenient on the span itself: malformed nesting is logged, not rejected.
    let result = extractor().extract("<response>outer <response> inner</response>");
    assert_eq!(result, Some("outer <response> inner".to_string()));
}

#[test]
fn given_custom_tags_when_extracting_then_uses_configured_pair() {
    let custom = ResponseExtractor::new(DelimiterPair::new("<out>", "</out>")).unwrap();
    assert_eq!(custom.extract("<out>custom</out>"), Some("custom".to_string()));
    assert_eq!(custom.extract("<response>wrong pair</response>"), None);
}

#[test]
fn given_closing_tag_in_text_when_checking_then_detected_case_insensitively() {
    let ex = extractor();
    assert!(ex.contains_closing_tag("done </RESPONSE>"));
    assert!(!ex.contains_closing_tag("<response> still going"));
}

#[test]
fn given_delimiter_pair_when_building_directive_then_names_both_tags() {
    let directive = DelimiterPair::default().format_directive();
    assert!(directive.contains("<response>"));
    assert!(directive.contains("</response>"));
}
