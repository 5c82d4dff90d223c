//! Minimal update set between two stores.

use super::{IntervalStore, Run, TextRange, boundary_points};
use crate::style::Style;

impl IntervalStore {
    /// Runs that must be re-applied to turn a rendering of `old` into one
    /// of `new`.
    ///
    /// The boundary points of both run lists split the text into slices
    /// that each lie entirely inside (or outside) every run. A slice is
    /// emitted with `new`'s style when the two sides differ, or with
    /// `base` when `new` has no style there but `old` had one. Slices are
    /// not merged, so an update may be split at the other store's
    /// boundaries.
    pub fn diff(old: &IntervalStore, new: &IntervalStore, base: &Style) -> Vec<Run> {
        let old_runs = old.runs();
        let new_runs = new.runs();
        let points = boundary_points(
            old_runs
                .iter()
                .chain(new_runs.iter())
                .map(|run| &run.range),
        );

        let mut old_cursor = RunCursor::new(old_runs);
        let mut new_cursor = RunCursor::new(new_runs);
        let mut updates = Vec::new();

        for window in points.windows(2) {
            let (start, end) = (window[0], window[1]);
            if start >= end {
                continue;
            }

            let old_style = old_cursor.style_at(start);
            let new_style = new_cursor.style_at(start);
            if old_style == new_style {
                continue;
            }

            let style = new_style.unwrap_or(base);
            updates.push(Run {
                range: TextRange::from_bounds(start, end),
                style: style.clone(),
            });
        }

        updates
    }
}

/// Forward-only lookup over a sorted run list.
struct RunCursor<'a> {
    runs: &'a [Run],
    index: usize,
}

impl<'a> RunCursor<'a> {
    fn new(runs: &'a [Run]) -> Self {
        Self { runs, index: 0 }
    }

    /// Style of the run containing `offset`; offsets must be non-decreasing.
    fn style_at(&mut self, offset: i64) -> Option<&'a Style> {
        while self
            .runs
            .get(self.index)
            .is_some_and(|run| run.range.end() <= offset)
        {
            self.index += 1;
        }
        self.runs
            .get(self.index)
            .filter(|run| run.range.start <= offset)
            .map(|run| &run.style)
    }
}
