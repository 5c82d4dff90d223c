//! Debounced, cancel-on-edit recomputation of the overlay.
//!
//! # Architecture
//!
//! ```text
//! on_edit(range, new_length)
//!       │
//!       ├─► Splice an EMPTY placeholder into the previous store (synchronous)
//!       │
//!       └─► schedule_render()
//!               │
//!               ├─► Cancel the pending render (if any), bump the generation
//!               │
//!               └─► Spawn timer task
//!                       │
//!                       ├─► Wait debounce duration (50ms default)
//!                       │
//!                       ├─► Composition in progress? reschedule and stop
//!                       │
//!                       ├─► Highlight full text (blocking pool)
//!                       │
//!                       ├─► Generation changed meanwhile? discard result
//!                       │
//!                       └─► build → diff against previous → apply → keep as previous
//!                           (one critical section, so no edit lands in between)
//! ```
//!
//! # Superseding
//!
//! Every schedule increments a generation counter. A render whose
//! generation is no longer current when its highlight result arrives is
//! dropped without touching the previous store or the host, so a
//! recomputation started just before an edit is wasted rather than
//! partially applied.
//!
//! # Previous overlay
//!
//! The previous store always mirrors what the host shows. It is kept when
//! an edit is rejected, when the highlighter is swapped and when
//! highlighting is disabled, so the next render reverts every range that
//! lost its style back to [`Style::BASE`].

use std::sync::{Arc, Mutex, Weak};

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use super::{RenderSettings, StyleUpdate, TextHost};
use crate::config::{StyleTable, UnknownLabels};
use crate::error::{LockResultExt, OverlayResult};
use crate::highlight::Highlighter;
use crate::interval::{IntervalStore, Run, TextRange};
use crate::style::Style;

/// Logging target for the render scheduler.
const LOG_TARGET: &str = "style_overlay::render";

/// Owns the last accepted overlay and drives its recomputation.
///
/// The host is held weakly: a render firing after the host is gone is a
/// no-op. Dropping the scheduler cancels any pending render.
pub struct RenderScheduler<H: TextHost> {
    inner: Arc<Inner<H>>,
}

struct Inner<H: TextHost> {
    host: Weak<H>,
    table: StyleTable,
    settings: RenderSettings,
    runtime: Handle,
    state: Mutex<RenderState>,
}

struct RenderState {
    /// Store matching what the host currently shows.
    previous: Option<IntervalStore>,
    highlighter: Option<Arc<dyn Highlighter>>,
    generation: u64,
    pending: Option<AbortHandle>,
    unknown_labels: UnknownLabels,
}

impl<H: TextHost> RenderScheduler<H> {
    /// Create a scheduler spawning its timers on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use
    /// [`with_runtime`](Self::with_runtime) from other threads.
    pub fn new(
        host: &Arc<H>,
        highlighter: Arc<dyn Highlighter>,
        table: StyleTable,
        settings: RenderSettings,
    ) -> Self {
        Self::with_runtime(Handle::current(), host, highlighter, table, settings)
    }

    pub fn with_runtime(
        runtime: Handle,
        host: &Arc<H>,
        highlighter: Arc<dyn Highlighter>,
        table: StyleTable,
        settings: RenderSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                host: Arc::downgrade(host),
                table,
                settings,
                runtime,
                state: Mutex::new(RenderState {
                    previous: None,
                    highlighter: Some(highlighter),
                    generation: 0,
                    pending: None,
                    unknown_labels: UnknownLabels::new(),
                }),
            }),
        }
    }

    /// Report a text edit: `range` (pre-edit coordinates) was replaced by
    /// `replacement_length` units of new text.
    ///
    /// The affected region of the previous overlay is reset to
    /// [`Style::EMPTY`] right away, then a render is scheduled. A rejected
    /// edit leaves the previous overlay unchanged.
    pub fn on_edit(&self, range: TextRange, replacement_length: i64) {
        {
            let mut state = self.inner.state.lock().recover_poison("RenderScheduler::on_edit");
            if let Some(previous) = state.previous.as_mut()
                && let Err(e) = poke(previous, range, replacement_length)
            {
                log::warn!(
                    target: LOG_TARGET,
                    "Rejected edit {} -> {}: {}",
                    range,
                    replacement_length,
                    e
                );
            }
        }
        self.schedule_render();
    }

    /// Schedule a render after the debounce delay, superseding any pending one.
    pub fn schedule_render(&self) {
        self.inner.schedule();
    }

    /// Render immediately, superseding any pending render.
    pub async fn render_now(&self) {
        let generation = self.inner.begin_cycle();
        self.inner.render(generation).await;
    }

    /// Stop highlighting: drops the highlighter and cancels pending work.
    ///
    /// The host keeps its current styling; the previous overlay is kept
    /// with it so a later highlighter diffs against what is on screen.
    pub fn disable(&self) {
        let mut state = self.inner.state.lock().recover_poison("RenderScheduler::disable");
        state.highlighter = None;
        state.generation += 1;
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
        log::debug!(target: LOG_TARGET, "Highlighting disabled");
    }

    /// Install a (new) highlighter.
    ///
    /// The next render diffs its result against the overlay currently
    /// shown, so styles the new highlighter does not produce are cleared.
    pub fn set_highlighter(&self, highlighter: Arc<dyn Highlighter>) {
        let mut state = self
            .inner
            .state
            .lock()
            .recover_poison("RenderScheduler::set_highlighter");
        state.highlighter = Some(highlighter);
    }

    /// Runs of the last accepted overlay, if any.
    pub fn previous_runs(&self) -> Option<Vec<Run>> {
        let state = self
            .inner
            .state
            .lock()
            .recover_poison("RenderScheduler::previous_runs");
        state.previous.as_ref().map(|store| store.runs().to_vec())
    }

    /// Whether a scheduled render has not finished yet.
    pub fn has_pending_render(&self) -> bool {
        let state = self
            .inner
            .state
            .lock()
            .recover_poison("RenderScheduler::has_pending_render");
        state
            .pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Labels highlighted so far that have no style table entry.
    pub fn unknown_labels(&self) -> Vec<String> {
        let state = self
            .inner
            .state
            .lock()
            .recover_poison("RenderScheduler::unknown_labels");
        state.unknown_labels.labels().map(str::to_string).collect()
    }
}

impl<H: TextHost> Drop for RenderScheduler<H> {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock().recover_poison("RenderScheduler::drop");
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
    }
}

impl<H: TextHost> Inner<H> {
    /// Cancel the pending render and start a new generation.
    fn begin_cycle(&self) -> u64 {
        let mut state = self.state.lock().recover_poison("RenderScheduler::begin_cycle");
        if let Some(handle) = state.pending.take() {
            handle.abort();
            log::trace!(target: LOG_TARGET, "Cancelled pending render");
        }
        state.generation += 1;
        state.generation
    }

    fn schedule(self: &Arc<Self>) {
        let generation = self.begin_cycle();
        let inner = Arc::clone(self);
        let delay = self.settings.debounce;

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            inner.render(generation).await;
        });

        let mut state = self.state.lock().recover_poison("RenderScheduler::schedule");
        if state.generation == generation {
            state.pending = Some(task.abort_handle());
        } else {
            // Superseded before it could be registered
            task.abort();
        }
    }

    async fn render(self: &Arc<Self>, generation: u64) {
        let Some(host) = self.host.upgrade() else {
            log::trace!(target: LOG_TARGET, "Host dropped, skipping render");
            return;
        };

        if host.has_provisional_composition() {
            {
                let mut state = self.state.lock().recover_poison("RenderScheduler::render");
                if state.generation != generation {
                    return;
                }
                state.pending = None;
            }
            log::debug!(
                target: LOG_TARGET,
                "Composition in progress, deferring render"
            );
            self.schedule();
            return;
        }

        let highlighter = {
            let state = self.state.lock().recover_poison("RenderScheduler::render");
            if state.generation != generation {
                return;
            }
            state.highlighter.clone()
        };
        let Some(highlighter) = highlighter else {
            log::debug!(target: LOG_TARGET, "No highlighter installed");
            return;
        };

        let text = host.current_full_text();
        let spans = match tokio::task::spawn_blocking(move || highlighter.highlight(&text)).await {
            Ok(Ok(spans)) => spans,
            Ok(Err(e)) => {
                log::warn!(target: LOG_TARGET, "{}; keeping previous overlay", e);
                return;
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Highlight task failed: {}", e);
                return;
            }
        };

        // Held until the host has applied the updates: an edit arriving
        // meanwhile must splice the store the host is showing
        let mut state = self.state.lock().recover_poison("RenderScheduler::render");
        if state.generation != generation {
            log::debug!(
                target: LOG_TARGET,
                "Discarding stale render (generation {} superseded by {})",
                generation,
                state.generation
            );
            return;
        }
        state.pending = None;

        let RenderState {
            previous,
            unknown_labels,
            ..
        } = &mut *state;
        let store = self.table.build_store(&spans, unknown_labels);
        let runs = match previous.as_ref() {
            Some(old) => IntervalStore::diff(old, &store, &Style::BASE),
            None => store.runs().to_vec(),
        };
        *previous = Some(store);

        log::debug!(
            target: LOG_TARGET,
            "Render generation {} produced {} updates",
            generation,
            runs.len()
        );
        if runs.is_empty() {
            return;
        }

        let updates = runs
            .into_iter()
            .map(|run| StyleUpdate {
                range: run.range,
                attributes: run
                    .style
                    .resolve(self.settings.base_size, self.settings.base_weight),
            })
            .collect();
        host.apply_updates(updates);
    }
}

/// Mark an edited region of the previous store as not yet styled.
///
/// The store usually ends where the last styled span ends, before the end
/// of the text. Edits beyond it touch no run: those starting past the end
/// are ignored and those straddling it are clamped.
fn poke(store: &mut IntervalStore, range: TextRange, new_length: i64) -> OverlayResult<()> {
    let covered = store.len();
    if range.length < 0 || new_length < 0 || range.start < 0 {
        return store.replace_style(range, Style::EMPTY, new_length);
    }
    if range.start > covered {
        return Ok(());
    }
    let range = if range.checked_end().is_none_or(|end| end > covered) {
        TextRange::from_bounds(range.start, covered)
    } else {
        range
    };
    store.replace_style(range, Style::EMPTY, new_length)
}
