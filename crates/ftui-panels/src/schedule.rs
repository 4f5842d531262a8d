#![forbid(unsafe_code)]

//! Deferred work queue for the navigation engine.
//!
//! Panel navigation has two deferral points that a host UI loop normally
//! provides implicitly: "after the current render pass" and "on the next
//! scheduling tick". [`DeferredQueue`] makes both explicit so the engine stays
//! deterministic and testable.
//!
//! # Invariants
//!
//! 1. Items drain in the order they were enqueued within a phase (FIFO).
//! 2. Draining a phase only yields items enqueued *before* the drain started;
//!    items enqueued while handling a drained batch wait for the next drain.
//! 3. Phases are independent: draining one never touches the other.

use std::collections::VecDeque;

/// When a deferred item becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// After the current render/update pass settles.
    AfterRender,
    /// On the next scheduling tick, after any render pass.
    NextTick,
}

/// Two-phase FIFO queue of deferred items.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    after_render: VecDeque<T>,
    next_tick: VecDeque<T>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            after_render: VecDeque::new(),
            next_tick: VecDeque::new(),
        }
    }
}

impl<T> DeferredQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `item` for `phase`.
    pub fn defer(&mut self, phase: Phase, item: T) {
        self.lane_mut(phase).push_back(item);
    }

    /// Take every item currently queued for `phase`, oldest first.
    pub fn take(&mut self, phase: Phase) -> Vec<T> {
        std::mem::take(self.lane_mut(phase)).into()
    }

    /// Number of items queued for `phase`.
    #[must_use]
    pub fn pending(&self, phase: Phase) -> usize {
        match phase {
            Phase::AfterRender => self.after_render.len(),
            Phase::NextTick => self.next_tick.len(),
        }
    }

    /// Whether nothing is queued in either phase.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.after_render.is_empty() && self.next_tick.is_empty()
    }

    fn lane_mut(&mut self, phase: Phase) -> &mut VecDeque<T> {
        match phase {
            Phase::AfterRender => &mut self.after_render,
            Phase::NextTick => &mut self.next_tick,
        }
    }
}
