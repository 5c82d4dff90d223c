//! Behavior tests for the interval store: edit splicing, building from
//! overlapping spans and diffing.

use rstest::rstest;
use style_overlay::{
    Color, Emphasis, IntervalStore, OverlayError, Run, Style, TextRange, Weight,
};

fn red() -> Style {
    Style::default().with_foreground(Color::Rgba(0xff, 0, 0, 0xff))
}

fn bold() -> Style {
    Style::default().with_weight(Weight::Bold)
}

fn italic() -> Style {
    Style::default().with_emphasis(Emphasis::ITALIC)
}

#[test]
fn insert_into_empty_store() {
    let mut store = IntervalStore::new();
    store
        .replace_style(TextRange::new(0, 0), Style::default(), 1)
        .unwrap();
    assert_eq!(store.len(), 1);
}

#[rstest]
#[case::past_end_of_empty_store(IntervalStore::new(), TextRange::new(1, 0), 1)]
#[case::negative_location(IntervalStore::new(), TextRange::new(-1, 0), 1)]
#[case::negative_length(IntervalStore::new(), TextRange::new(0, -1), 1)]
#[case::negative_replacement(IntervalStore::new(), TextRange::new(0, 0), -1)]
#[case::start_past_covered(store_of_length(5), TextRange::new(6, 1), 1)]
#[case::end_past_covered(store_of_length(5), TextRange::new(4, 4), 2)]
#[case::end_overflows(store_of_length(10), TextRange::new(5, i64::MAX), 1)]
#[case::replacement_overflows(store_of_length(10), TextRange::new(5, 0), i64::MAX)]
fn invalid_edits_are_rejected(
    #[case] mut store: IntervalStore,
    #[case] range: TextRange,
    #[case] new_length: i64,
) {
    let before = store.runs().to_vec();
    let result = store.replace_style(range, Style::default(), new_length);
    assert!(matches!(result, Err(OverlayError::InvalidRange { .. })));
    assert_eq!(store.runs(), before.as_slice());
}

fn store_of_length(length: i64) -> IntervalStore {
    let mut store = IntervalStore::new();
    store
        .replace_style(TextRange::new(0, 0), Style::default(), length)
        .unwrap();
    store
}

#[test]
fn replace_new_style() {
    let base = Style::default();
    let mut store = IntervalStore::new();

    store
        .replace_style(TextRange::new(0, 0), base.clone(), 10)
        .unwrap();
    store.check_invariants().unwrap();

    store
        .replace_style(TextRange::new(5, 3), bold(), 3)
        .unwrap();
    store.check_invariants().unwrap();
    assert_eq!(
        store.runs(),
        &[
            Run::new(0..5, base.clone()),
            Run::new(5..8, bold()),
            Run::new(8..10, base.clone()),
        ]
    );

    store.replace_style(TextRange::new(7, 0), red(), 5).unwrap();
    store.check_invariants().unwrap();
    let mut expected = vec![
        Run::new(0..5, base.clone()),
        Run::new(5..7, bold()),
        Run::new(7..12, red()),
        Run::new(12..13, bold()),
        Run::new(13..15, base.clone()),
    ];
    assert_eq!(store.runs(), expected.as_slice());

    store
        .replace_style(TextRange::new(7, 5), italic(), 5)
        .unwrap();
    store.check_invariants().unwrap();
    expected[2].style = italic();
    assert_eq!(store.runs(), expected.as_slice());
}

#[test]
fn replacing_with_neighbour_style_coalesces() {
    let mut store = IntervalStore::build([
        (TextRange::new(0, 5), Style::BASE),
        (TextRange::new(5, 3), bold()),
        (TextRange::new(8, 2), Style::BASE),
    ]);
    store
        .replace_style(TextRange::new(5, 3), Style::BASE, 3)
        .unwrap();
    assert_eq!(store.runs(), &[Run::new(0..10, Style::BASE)]);
}

#[test]
fn coalescing_is_idempotent() {
    let mut store = store_of_length(4);
    store
        .replace_style(TextRange::new(2, 0), Style::default(), 3)
        .unwrap();
    store
        .replace_style(TextRange::new(1, 1), bold(), 1)
        .unwrap();

    let first = store.runs().to_vec();
    let second = store.runs().to_vec();
    assert_eq!(first, second);

    // Rebuilding from already coalesced runs changes nothing
    let rebuilt: IntervalStore = first.iter().cloned().collect();
    assert_eq!(rebuilt.runs(), first.as_slice());
}

/// Deterministic pseudo-random sequence for edit fuzzing.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: i64) -> i64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % (bound.max(1) as u64)) as i64
    }
}

#[test]
fn random_edits_preserve_coverage() {
    let styles = [Style::BASE, bold(), red(), italic(), Style::EMPTY];
    let mut rng = Lcg(0x5eed);
    let mut store = IntervalStore::new();
    let mut expected_len = 0i64;

    for step in 0..500 {
        let start = rng.next(expected_len + 1);
        let length = rng.next(expected_len - start + 1);
        let new_length = rng.next(6);
        let style = styles[rng.next(styles.len() as i64) as usize].clone();

        store
            .replace_style(TextRange::new(start, length), style, new_length)
            .unwrap_or_else(|e| panic!("step {step}: {e}"));
        expected_len += new_length - length;

        assert_eq!(store.len(), expected_len, "step {step}");
        store
            .check_invariants()
            .unwrap_or_else(|e| panic!("step {step}: {e}"));

        let runs = store.runs();
        if let Some(first) = runs.first() {
            assert_eq!(first.range.start, 0, "step {step}");
        }
        for pair in runs.windows(2) {
            assert_ne!(pair[0].style, pair[1].style, "step {step}: uncoalesced");
        }
        assert!(runs.iter().all(|run| run.range.length > 0));
    }
}

#[test]
fn build_overlapping_spans() {
    let a = Style::default()
        .with_foreground(Color::Text)
        .with_weight(Weight::Bold)
        .with_label("A")
        .with_priority(1);
    let b = Style::default()
        .with_foreground(Color::Link)
        .with_label("B")
        .with_priority(2);

    let store = IntervalStore::build([
        (TextRange::from_bounds(5, 8), a.clone()),
        (TextRange::from_bounds(6, 10), b.clone()),
    ]);

    let runs = store.runs();
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0], Run::new(5..6, a.clone()));
    assert_eq!(runs[1].range, TextRange::from_bounds(6, 8));
    assert_eq!(runs[1].style, a.merge(&b));
    assert_eq!(runs[1].style.foreground, Some(Color::Link));
    assert_eq!(runs[1].style.weight, Some(Weight::Bold));
    assert_eq!(
        runs[1].style.labels.iter().cloned().collect::<Vec<_>>(),
        vec!["A".to_string(), "B".to_string()]
    );
    assert_eq!(runs[2], Run::new(8..10, b));
    store.check_invariants().unwrap();
}

#[test]
fn build_matches_pointwise_merge() {
    // Every offset's style equals the fold of the spans covering it
    let spans = vec![
        (TextRange::new(0, 12), Style::default().with_label("para").with_priority(0)),
        (TextRange::new(2, 4), Style::default().with_label("strong").with_priority(1)),
        (TextRange::new(4, 6), Style::default().with_label("em").with_priority(2)),
        (TextRange::new(4, 1), Style::default().with_label("mark").with_priority(10)),
        (TextRange::new(15, 2), Style::default().with_label("tail")),
    ];
    let store = IntervalStore::build(spans.clone());

    for offset in 0..20 {
        let point = TextRange::new(offset, 1);
        let expected = spans
            .iter()
            .filter(|(range, _)| range.intersection_len(&point) > 0)
            .map(|(_, style)| style.clone())
            .reduce(|acc, style| acc.merge(&style));
        assert_eq!(store.style_at(point).cloned(), expected, "offset {offset}");
    }
}

#[test]
fn diff_of_equal_stores_is_empty() {
    let spans = [
        (TextRange::new(0, 4), bold().with_label("strong")),
        (TextRange::new(6, 3), red().with_label("uri")),
    ];
    let old = IntervalStore::build(spans.clone());
    let new = IntervalStore::build(spans);
    assert!(IntervalStore::diff(&old, &new, &Style::BASE).is_empty());
}

#[test]
fn diff_reports_only_the_changed_run() {
    let old = IntervalStore::build([
        (TextRange::new(0, 4), Style::BASE),
        (TextRange::new(4, 3), bold()),
        (TextRange::new(7, 5), Style::BASE),
    ]);
    let new = IntervalStore::build([
        (TextRange::new(0, 4), Style::BASE),
        (TextRange::new(4, 3), italic()),
        (TextRange::new(7, 5), Style::BASE),
    ]);

    let updates = IntervalStore::diff(&old, &new, &Style::BASE);
    assert_eq!(updates, vec![Run::new(4..7, italic())]);
}

#[test]
fn diff_after_placeholder_edit_restyles_inserted_text() {
    // Previous overlay gets an EMPTY placeholder for typed text, the new
    // highlight styles it: exactly the inserted range is updated.
    let mut old = IntervalStore::build([(TextRange::new(0, 10), Style::BASE)]);
    old.replace_style(TextRange::new(4, 0), Style::EMPTY, 2)
        .unwrap();
    let new = IntervalStore::build([(TextRange::new(0, 12), Style::BASE)]);

    let updates = IntervalStore::diff(&old, &new, &Style::BASE);
    assert_eq!(updates, vec![Run::new(4..6, Style::BASE)]);
}

#[test]
fn diff_clears_styles_that_disappeared() {
    let old = IntervalStore::build([(TextRange::new(3, 4), bold().with_label("strong"))]);
    let new = IntervalStore::new();

    let updates = IntervalStore::diff(&old, &new, &Style::BASE);
    assert_eq!(updates, vec![Run::new(3..7, Style::BASE)]);
}
