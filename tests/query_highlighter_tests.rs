//! Tree-sitter query highlighting against the Rust grammar.

use style_overlay::{
    Highlighter, IntervalStore, OverlayError, QueryHighlighter, Style, StyleTable, UnknownLabels,
    Weight,
};
use tree_sitter::Language;

const HIGHLIGHTS: &str = r#"
(line_comment) @comment
(string_literal) @string
"fn" @keyword
(identifier) @_ident
"#;

fn rust() -> Language {
    tree_sitter_rust::LANGUAGE.into()
}

fn spans_for(highlighter: &QueryHighlighter, text: &str) -> Vec<(i64, i64, String)> {
    let mut spans: Vec<_> = highlighter
        .highlight(text)
        .unwrap()
        .into_iter()
        .map(|span| (span.start, span.end, span.label))
        .collect();
    spans.sort();
    spans
}

#[test]
fn test_highlight_reports_captures() {
    let highlighter = QueryHighlighter::new(&rust(), HIGHLIGHTS).unwrap();
    let spans = spans_for(&highlighter, "fn main() { let s = \"hi\"; }");

    assert_eq!(
        spans,
        vec![
            (0, 2, "keyword".to_string()),
            (20, 24, "string".to_string()),
        ]
    );
}

#[test]
fn test_offsets_are_utf16_code_units() {
    let highlighter = QueryHighlighter::new(&rust(), HIGHLIGHTS).unwrap();
    let text = "// héllo\nfn main() { let s = \"ü\"; }";
    let spans = spans_for(&highlighter, text);

    let comment = spans.iter().find(|(_, _, label)| label == "comment").unwrap();
    assert_eq!(comment.0, 0);
    assert!(comment.1 >= 8 && comment.1 <= 9);

    assert!(spans.contains(&(9, 11, "keyword".to_string())));
    assert!(spans.contains(&(29, 32, "string".to_string())));
}

#[test]
fn test_underscore_captures_are_skipped() {
    let highlighter = QueryHighlighter::new(&rust(), HIGHLIGHTS).unwrap();
    let spans = spans_for(&highlighter, "fn main() {}");
    assert!(spans.iter().all(|(_, _, label)| !label.starts_with('_')));
}

#[test]
fn test_labels_lists_capture_names() {
    let highlighter = QueryHighlighter::new(&rust(), HIGHLIGHTS).unwrap();
    assert_eq!(
        highlighter.labels().collect::<Vec<_>>(),
        vec!["comment", "string", "keyword", "_ident"]
    );
}

#[test]
fn test_invalid_query_is_highlight_unavailable() {
    let result = QueryHighlighter::new(&rust(), "(no_such_node) @oops");
    assert!(matches!(
        result,
        Err(OverlayError::HighlightUnavailable { .. })
    ));
}

#[test]
fn test_highlight_feeds_style_table() {
    let highlighter = QueryHighlighter::new(&rust(), HIGHLIGHTS).unwrap();
    let table: StyleTable = [
        ("keyword", Style::default().with_weight(Weight::Bold).with_priority(1)),
        ("string", Style::default().with_weight(Weight::Light).with_priority(1)),
    ]
    .into_iter()
    .collect();

    let text = "fn main() { let s = \"hi\"; }";
    let mut unknown = UnknownLabels::new();
    let store = table.build_store(&highlighter.highlight(text).unwrap(), &mut unknown);

    assert!(unknown.is_empty());
    store.check_invariants().unwrap();
    assert_eq!(store.runs().len(), 2);
    assert_eq!(store.runs()[0].style.weight, Some(Weight::Bold));
    assert_eq!(store.runs()[1].style.weight, Some(Weight::Light));

    // A second pass over identical text changes nothing
    let again = table.build_store(&highlighter.highlight(text).unwrap(), &mut unknown);
    assert!(IntervalStore::diff(&store, &again, &Style::BASE).is_empty());
}
