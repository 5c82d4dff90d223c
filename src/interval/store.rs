//! The run list and its edit splice.

use std::cell::OnceCell;
use std::mem;

use super::{Run, TextRange};
use crate::error::{OverlayError, OverlayResult};
use crate::style::Style;

/// An ordered list of non-overlapping style runs.
///
/// Edits leave the list un-coalesced (adjacent runs may carry equal
/// styles). Coalescing happens on the next call to [`runs`](Self::runs)
/// and is cached until the following edit. The accessor therefore does
/// work on first use, but always returns the same sequence for the same
/// store contents.
#[derive(Debug, Default, Clone)]
pub struct IntervalStore {
    raw: Vec<Run>,
    coalesced: OnceCell<Vec<Run>>,
}

impl IntervalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap runs that are already sorted, contiguous and maximal.
    pub(super) fn from_coalesced(runs: Vec<Run>) -> Self {
        Self {
            raw: Vec::new(),
            coalesced: OnceCell::from(runs),
        }
    }

    /// The coalesced run list.
    pub fn runs(&self) -> &[Run] {
        self.coalesced.get_or_init(|| coalesce(&self.raw))
    }

    /// Whether the last edit has not been coalesced yet.
    pub fn needs_coalescing(&self) -> bool {
        self.coalesced.get().is_none()
    }

    /// Upper bound of the last run, i.e. how far the store reaches.
    pub fn len(&self) -> i64 {
        self.current().last().map_or(0, |run| run.range.end())
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Style of the run intersecting `range`, if any.
    ///
    /// Callers pass sub-ranges that never straddle a run boundary, so the
    /// first intersecting run is the only one.
    pub fn style_at(&self, range: TextRange) -> Option<&Style> {
        let runs = self.runs();
        let idx = runs.partition_point(|run| run.range.end() <= range.start);
        runs.get(idx)
            .filter(|run| run.range.intersection_len(&range) > 0)
            .map(|run| &run.style)
    }

    /// Apply a text edit to the run list.
    ///
    /// `range` is the span being replaced, in the coordinates before the
    /// edit, and `new_length` the length of the text replacing it. Runs
    /// before the edit are kept, runs after it shift by the length delta,
    /// and runs straddling it are split. The replaced region becomes a
    /// single run of `style` unless `new_length` is zero.
    ///
    /// Fails with [`OverlayError::InvalidRange`] on negative sizes, when
    /// `range` reaches past [`len`](Self::len) or when the shifted offsets
    /// would overflow; the store is unchanged then.
    pub fn replace_style(
        &mut self,
        range: TextRange,
        style: Style,
        new_length: i64,
    ) -> OverlayResult<()> {
        let covered = self.len();
        let in_bounds = range.start >= 0
            && range.length >= 0
            && new_length >= 0
            && range.checked_end().is_some_and(|end| end <= covered)
            && range.start.checked_add(new_length).is_some()
            && covered.checked_add(new_length - range.length).is_some();
        if !in_bounds {
            return Err(OverlayError::invalid_range(
                range.start,
                range.length,
                new_length,
                covered,
            ));
        }

        let current = match self.coalesced.take() {
            Some(runs) => runs,
            None => mem::take(&mut self.raw),
        };

        let delta = new_length - range.length;
        let mut result = Vec::with_capacity(current.len() + 2);
        let mut replacement =
            (new_length > 0).then(|| Run::new(TextRange::new(range.start, new_length), style));

        for run in current {
            let original = run.range;

            if original.end() <= range.start {
                result.push(run);
            } else if original.start >= range.end() {
                result.extend(replacement.take());
                result.push(Run {
                    range: TextRange::new(original.start + delta, original.length),
                    style: run.style,
                });
            } else {
                if original.start < range.start {
                    result.push(Run {
                        range: TextRange::from_bounds(original.start, range.start),
                        style: run.style.clone(),
                    });
                }

                result.extend(replacement.take());

                if original.end() > range.end() {
                    result.push(Run {
                        range: TextRange::from_bounds(
                            range.end() + delta,
                            original.end() + delta,
                        ),
                        style: run.style,
                    });
                }
            }
        }
        result.extend(replacement);

        self.raw = result;
        Ok(())
    }

    /// Verify that every run starts where the previous one ended.
    pub fn check_invariants(&self) -> OverlayResult<()> {
        let runs = self.current();
        for (index, pair) in runs.windows(2).enumerate() {
            let expected = pair[0].range.end();
            let found = pair[1].range.start;
            if expected != found {
                return Err(OverlayError::NonContiguousRanges {
                    index: index + 1,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// The run list as currently stored, coalesced or not.
    fn current(&self) -> &[Run] {
        match self.coalesced.get() {
            Some(runs) => runs,
            None => &self.raw,
        }
    }
}

impl PartialEq for IntervalStore {
    fn eq(&self, other: &Self) -> bool {
        self.runs() == other.runs()
    }
}

impl FromIterator<Run> for IntervalStore {
    /// Collect runs that are sorted and non-overlapping; equal neighbours
    /// are coalesced on first read.
    fn from_iter<I: IntoIterator<Item = Run>>(iter: I) -> Self {
        Self {
            raw: iter.into_iter().collect(),
            coalesced: OnceCell::new(),
        }
    }
}

/// Merge touching runs with equal styles.
fn coalesce(runs: &[Run]) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        if let Some(last) = merged.last_mut()
            && last.style == run.style
            && last.range.end() == run.range.start
        {
            last.range.length += run.range.length;
            continue;
        }
        merged.push(run.clone());
    }
    merged
}
