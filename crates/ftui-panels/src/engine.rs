#![forbid(unsafe_code)]

//! Panel navigation engine.
//!
//! [`NavigationEngine`] is a controlled component: the caller owns the
//! authoritative selection. The engine *requests* changes by emitting
//! [`PanelEvent::UpdateSelection`] and reacts to confirmed changes through
//! [`NavigationEngine::on_selection_changed`].
//!
//! # State machine
//!
//! The engine is either UNRESOLVED (`current_index() == None`) or
//! RESOLVED(i) for an enabled panel `i`. It moves on external selection
//! changes, list rebuilds, and offset navigation. There is no terminal state.
//!
//! # Suppression window
//!
//! Offset navigation ([`go_to_offset`](NavigationEngine::go_to_offset)) knows
//! its direction up front, including across a wraparound where the raw index
//! jumps the "wrong" way. While its request is in flight, the index-diff
//! direction inference in `on_selection_changed` is suppressed. Each offset
//! navigation bumps a generation counter; the deferred release only lifts
//! suppression if no later navigation has claimed it since.
//!
//! # Deferred work
//!
//! - [`settle`](NavigationEngine::settle): the render pass finished. Emits
//!   pending [`PanelEvent::Transition`]s.
//! - [`tick`](NavigationEngine::tick): the next scheduling tick. Settles, then
//!   runs suppression releases.
//!
//! # Invariants
//!
//! 1. `current_index()` is `None` or the index of an enabled panel in the
//!    latest list.
//! 2. `BeforeTransition` for a change is always emitted before its
//!    `Transition`; neither is emitted when the index did not change.
//! 3. Offset navigation never requests a disabled panel.

use crate::config::PanelsConfig;
use crate::direction::{Direction, direction_between};
use crate::gesture::{GestureAdapter, SwipeDirection, TextDirection};
use crate::name::PanelName;
use crate::registry::{Panel, PanelNode, PanelRegistry};
use crate::retention::RetentionCache;
use crate::schedule::{DeferredQueue, Phase};
use crate::selection::index_of;

/// Event emitted by the engine for the owner of the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// The engine asks the owner to set the selection to this name.
    UpdateSelection(PanelName),
    /// The visible panel is about to change.
    BeforeTransition {
        new: Option<PanelName>,
        old: Option<PanelName>,
    },
    /// The visible panel changed and the render pass has settled.
    Transition {
        new: Option<PanelName>,
        old: Option<PanelName>,
    },
}

/// Navigation state owned by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Resolved index, `None` when the selection addresses no enabled panel.
    pub current_index: Option<usize>,
    /// Transition to play for the current change.
    pub transition_name: Option<String>,
    /// Generation of the offset navigation holding the suppression window.
    pub suppression: Option<u64>,
}

impl NavigationState {
    /// Whether direction inference is currently suppressed.
    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        self.suppression.is_some()
    }
}

/// Work deferred to a later phase.
#[derive(Debug, Clone, PartialEq)]
enum Deferred {
    Transition {
        new: Option<PanelName>,
        old: Option<PanelName>,
    },
    ReleaseSuppression {
        generation: u64,
    },
}

/// The panel navigation state machine.
#[derive(Debug, Clone)]
pub struct NavigationEngine<C> {
    config: PanelsConfig,
    registry: PanelRegistry<C>,
    state: NavigationState,
    selection: Option<PanelName>,
    text_direction: TextDirection,
    generation: u64,
    queue: DeferredQueue<Deferred>,
    events: Vec<PanelEvent>,
    retention: Option<RetentionCache>,
}

impl<C> NavigationEngine<C> {
    /// Create an engine with an empty panel list.
    ///
    /// `selection` is the owner's current selection. It stays unresolved
    /// until panels arrive via [`set_children`](Self::set_children).
    #[must_use]
    pub fn new(config: PanelsConfig, selection: Option<PanelName>) -> Self {
        let retention = config.retention.build_cache();
        Self {
            config,
            registry: PanelRegistry::new(),
            state: NavigationState::default(),
            selection,
            text_direction: TextDirection::default(),
            generation: 0,
            queue: DeferredQueue::new(),
            events: Vec::new(),
            retention,
        }
    }

    // ── Read access ───────────────────────────────────────────────

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &PanelsConfig {
        &self.config
    }

    /// Current navigation state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Resolved index of the current panel.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    /// Transition name for the latest change.
    #[must_use]
    pub fn transition_name(&self) -> Option<&str> {
        self.state.transition_name.as_deref()
    }

    /// Whether direction inference is suppressed.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.state.is_suppressed()
    }

    /// Last selection confirmed by the owner.
    #[must_use]
    pub fn selection(&self) -> Option<&PanelName> {
        self.selection.as_ref()
    }

    /// Full panel list, including disabled panels.
    #[must_use]
    pub fn panels(&self) -> &[Panel<C>] {
        self.registry.list()
    }

    /// Enabled panels in list order.
    #[must_use]
    pub fn enabled_panels(&self) -> Vec<&Panel<C>> {
        self.registry.enabled_panels()
    }

    /// Panel registry.
    #[must_use]
    pub fn registry(&self) -> &PanelRegistry<C> {
        &self.registry
    }

    /// Retention keep-set, `None` when retention is off.
    #[must_use]
    pub fn retention(&self) -> Option<&RetentionCache> {
        self.retention.as_ref()
    }

    /// Locale text direction used for swipes.
    #[must_use]
    pub fn text_direction(&self) -> TextDirection {
        self.text_direction
    }

    /// Set the locale text direction used for swipes.
    pub fn set_text_direction(&mut self, text_direction: TextDirection) {
        self.text_direction = text_direction;
    }

    // ── Events ────────────────────────────────────────────────────

    /// Take every event emitted so far, oldest first.
    pub fn drain_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted but not yet drained.
    #[must_use]
    pub fn pending_events(&self) -> &[PanelEvent] {
        &self.events
    }

    /// Whether deferred work is still queued.
    #[must_use]
    pub fn has_deferred_work(&self) -> bool {
        !self.queue.is_idle()
    }

    // ── Content ───────────────────────────────────────────────────

    /// Rebuild the panel list from raw children and re-resolve the selection.
    ///
    /// Returns the new list length.
    pub fn set_children(&mut self, children: impl IntoIterator<Item = PanelNode<C>>) -> usize {
        let len = self.registry.rebuild(children);
        self.recompute_current_index();
        if let Some(retention) = self.retention.as_mut() {
            let live: Vec<String> = self.registry.list().iter().map(Panel::key).collect();
            retention.retain_keys(|key| live.iter().any(|k| k == key));
        }
        len
    }

    /// Re-resolve the confirmed selection against the latest list.
    ///
    /// Emits no events; the owner did not change anything.
    pub fn recompute_current_index(&mut self) -> Option<usize> {
        let index = index_of(self.selection.as_ref(), self.registry.list());
        if self.state.current_index != index {
            self.state.current_index = index;
            self.record_display();
        }
        index
    }

    // ── Navigation ────────────────────────────────────────────────

    /// Ask the owner to select `name`.
    pub fn go_to(&mut self, name: impl Into<PanelName>) {
        let name = name.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panels.request", name = %name);

        self.events.push(PanelEvent::UpdateSelection(name));
    }

    /// The owner confirmed a selection change from `old` to `new`.
    ///
    /// Returns whether the resolved index changed.
    pub fn on_selection_changed(
        &mut self,
        new: Option<PanelName>,
        old: Option<PanelName>,
    ) -> bool {
        self.selection = new.clone();
        let index = index_of(new.as_ref(), self.registry.list());

        if !self.state.is_suppressed() {
            let previous = index_of(old.as_ref(), self.registry.list());
            self.update_transition(direction_between(previous, index));
        }

        if self.state.current_index == index {
            return false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panels.select",
            from = ?self.state.current_index,
            to = ?index,
            transition = ?self.state.transition_name,
            suppressed = self.state.is_suppressed()
        );

        self.state.current_index = index;
        self.record_display();
        self.events.push(PanelEvent::BeforeTransition {
            new: new.clone(),
            old: old.clone(),
        });
        self.queue
            .defer(Phase::AfterRender, Deferred::Transition { new, old });
        true
    }

    /// Step to the next enabled panel.
    pub fn next(&mut self) -> bool {
        self.go_to_offset(Direction::Forward)
    }

    /// Step to the previous enabled panel.
    pub fn previous(&mut self) -> bool {
        self.go_to_offset(Direction::Backward)
    }

    /// Step one enabled panel in `direction` from the current index.
    pub fn go_to_offset(&mut self, direction: Direction) -> bool {
        let start = self.current_index().map_or(-1, |i| i as isize);
        self.go_to_offset_from(direction, start)
    }

    /// Step one enabled panel in `direction`, scanning from `start`.
    ///
    /// `start` may sit just outside the list (`-1` or `len`) to scan inward
    /// from an edge. Disabled panels are skipped. When the scan leaves the
    /// list without a match, infinite mode restarts it from just outside the
    /// opposite edge, once; otherwise nothing happens.
    ///
    /// Returns whether a selection request was emitted.
    pub fn go_to_offset_from(&mut self, direction: Direction, start: isize) -> bool {
        let step = direction.offset() as isize;
        if step == 0 {
            return false;
        }
        let len = self.registry.len() as isize;

        let mut index = start.checked_add(step);
        while let Some(at) = index.filter(|i| (0..len).contains(i)) {
            if let Some(panel) = self.registry.get(at as usize)
                && panel.is_enabled()
            {
                let name = panel.name().clone();

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "panels.offset",
                    direction = ?direction,
                    start,
                    target = at
                );

                self.update_transition(direction);
                self.generation += 1;
                self.state.suppression = Some(self.generation);
                self.go_to(name);
                self.queue.defer(
                    Phase::NextTick,
                    Deferred::ReleaseSuppression {
                        generation: self.generation,
                    },
                );
                return true;
            }
            index = at.checked_add(step);
        }

        if self.config.infinite && len > 0 && start != -1 && start != len {
            let restart = if direction == Direction::Backward { len } else { -1 };

            #[cfg(feature = "tracing")]
            tracing::debug!(message = "panels.wrap", direction = ?direction, start, restart);

            return self.go_to_offset_from(direction, restart);
        }
        false
    }

    /// Route a recognized swipe to offset navigation.
    ///
    /// Ignored unless the view is swipeable and the swipe is on-axis.
    pub fn on_swipe(&mut self, swipe: SwipeDirection) -> bool {
        if !self.config.swipeable {
            return false;
        }
        let adapter = GestureAdapter::new(self.config.vertical, self.text_direction);
        match adapter.offset_for(swipe) {
            Some(direction) => self.go_to_offset(direction),
            None => false,
        }
    }

    // ── Deferred work ─────────────────────────────────────────────

    /// The render pass settled: emit pending transition events.
    ///
    /// Returns the number of deferred items processed.
    pub fn settle(&mut self) -> usize {
        #[cfg(feature = "tracing")]
        let started = web_time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "panels.settle",
            pending = self.queue.pending(Phase::AfterRender),
            duration_us = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _guard = span.enter();

        let processed = self.run_phase(Phase::AfterRender);

        #[cfg(feature = "tracing")]
        span.record("duration_us", started.elapsed().as_micros() as u64);

        processed
    }

    /// The next scheduling tick: settle, then release suppression windows.
    ///
    /// Returns the number of deferred items processed.
    pub fn tick(&mut self) -> usize {
        self.settle() + self.run_phase(Phase::NextTick)
    }

    fn run_phase(&mut self, phase: Phase) -> usize {
        let batch = self.queue.take(phase);
        let processed = batch.len();
        for item in batch {
            match item {
                Deferred::Transition { new, old } => {
                    self.events.push(PanelEvent::Transition { new, old });
                }
                Deferred::ReleaseSuppression { generation } => {
                    if self.state.suppression == Some(generation) {
                        self.state.suppression = None;
                    }

                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        message = "panels.suppression",
                        generation,
                        released = self.state.suppression.is_none()
                    );
                }
            }
        }
        processed
    }

    // ── Internal helpers ──────────────────────────────────────────

    fn update_transition(&mut self, direction: Direction) {
        let name = self
            .config
            .transition_policy()
            .transition_name_for(direction, self.state.current_index);
        if self.state.transition_name != name {
            self.state.transition_name = name;
        }
    }

    fn record_display(&mut self) {
        let Some(retention) = self.retention.as_mut() else {
            return;
        };
        let Some(panel) = self.state.current_index.and_then(|i| self.registry.get(i)) else {
            return;
        };
        retention.record_display(&panel.key());
    }
}
