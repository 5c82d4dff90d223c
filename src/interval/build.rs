//! Construction of a run list from overlapping highlight spans.

use std::collections::BTreeSet;

use super::{IntervalStore, Run, TextRange, boundary_points};
use crate::style::Style;

impl IntervalStore {
    /// Build a store from possibly overlapping `(range, style)` spans.
    ///
    /// Every boundary point of every span is collected and sorted; each
    /// slice between two consecutive points gets the merge of all spans
    /// covering it, folded left to right in input order. Slices no span
    /// covers are left as gaps. Neighbouring slices with equal styles are
    /// joined as they are produced, so the result is already coalesced.
    ///
    /// Zero-length spans are ignored.
    pub fn build<I>(spans: I) -> Self
    where
        I: IntoIterator<Item = (TextRange, Style)>,
    {
        let spans: Vec<(TextRange, Style)> = spans
            .into_iter()
            .filter(|(range, _)| !range.is_empty())
            .collect();
        if spans.is_empty() {
            return Self::new();
        }

        let points = boundary_points(spans.iter().map(|(range, _)| range));

        let mut by_start: Vec<usize> = (0..spans.len()).collect();
        by_start.sort_by_key(|&i| spans[i].0.start);
        let mut by_end = by_start.clone();
        by_end.sort_by_key(|&i| spans[i].0.end());

        // Indices of the spans covering the current slice, in input order
        let mut active: BTreeSet<usize> = BTreeSet::new();
        let mut next_start = 0;
        let mut next_end = 0;
        let mut runs: Vec<Run> = Vec::new();

        for window in points.windows(2) {
            let (start, end) = (window[0], window[1]);

            while next_end < by_end.len() && spans[by_end[next_end]].0.end() <= start {
                active.remove(&by_end[next_end]);
                next_end += 1;
            }
            while next_start < by_start.len() && spans[by_start[next_start]].0.start <= start {
                active.insert(by_start[next_start]);
                next_start += 1;
            }

            let mut covering = active.iter().map(|&i| &spans[i].1);
            let Some(first) = covering.next() else {
                continue;
            };
            let style = covering.fold(first.clone(), |acc, style| acc.merge(style));

            if let Some(last) = runs.last_mut()
                && last.range.end() == start
                && last.style == style
            {
                last.range.length += end - start;
                continue;
            }
            runs.push(Run {
                range: TextRange::from_bounds(start, end),
                style,
            });
        }

        Self::from_coalesced(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Emphasis, Weight};

    #[test]
    fn test_build_empty_input() {
        let store = IntervalStore::build(Vec::new());
        assert!(store.runs().is_empty());
        assert!(!store.needs_coalescing());
    }

    #[test]
    fn test_build_ignores_zero_length_spans() {
        let store = IntervalStore::build([
            (TextRange::new(3, 0), Style::BASE),
            (TextRange::new(5, 0), Style::default().with_label("x")),
        ]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_build_leaves_gaps_between_disjoint_spans() {
        let a = Style::default().with_label("a");
        let b = Style::default().with_label("b");
        let store = IntervalStore::build([
            (TextRange::new(8, 2), b.clone()),
            (TextRange::new(0, 3), a.clone()),
        ]);
        assert_eq!(store.runs(), &[Run::new(0..3, a), Run::new(8..10, b)]);
    }

    #[test]
    fn test_build_coalesces_equal_neighbours() {
        let code = Style::default()
            .with_emphasis(Emphasis::MONOSPACE)
            .with_label("text.code");
        let store = IntervalStore::build([
            (TextRange::new(0, 4), code.clone()),
            (TextRange::new(4, 4), code.clone()),
        ]);
        assert_eq!(store.runs(), &[Run::new(0..8, code)]);
    }

    #[test]
    fn test_build_nested_spans() {
        let heading = Style::default()
            .with_size(1.4)
            .with_weight(Weight::Bold)
            .with_label("text.title.h1")
            .with_priority(1);
        let marker = Style::default()
            .with_foreground(Color::Gray)
            .with_label("punctuation.special")
            .with_priority(10);

        let store = IntervalStore::build([
            (TextRange::new(0, 10), heading.clone()),
            (TextRange::new(0, 2), marker.clone()),
        ]);

        let runs = store.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].range, TextRange::new(0, 2));
        assert_eq!(runs[0].style, heading.merge(&marker));
        assert_eq!(runs[0].style.foreground, Some(Color::Gray));
        assert_eq!(runs[0].style.size, Some(1.4));
        assert_eq!(runs[1], Run::new(2..10, heading));
    }

    #[test]
    fn test_build_folds_in_input_order() {
        // Equal priorities: the first span's fields win
        let first = Style::default().with_foreground(Color::Link);
        let second = Style::default().with_foreground(Color::Gray);
        let store = IntervalStore::build([
            (TextRange::new(0, 4), first),
            (TextRange::new(0, 4), second),
        ]);
        assert_eq!(store.runs()[0].style.foreground, Some(Color::Link));
    }
}
