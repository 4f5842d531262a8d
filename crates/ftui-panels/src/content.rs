#![forbid(unsafe_code)]

//! Visible content selection.
//!
//! The render surface asks the engine what to draw: the visible panel, the
//! key that identifies it, the transition to wrap it in, and the keys whose
//! rendered state should be kept alive while hidden.

use crate::engine::NavigationEngine;
use crate::name::PanelName;
use crate::registry::Panel;

/// Panel at `current`, or `None` when unresolved or out of range.
#[must_use]
pub fn visible_panel<C>(list: &[Panel<C>], current: Option<usize>) -> Option<&Panel<C>> {
    current.and_then(|i| list.get(i))
}

/// What the render surface should show.
#[derive(Debug)]
pub struct PanelContent<'a, C> {
    /// Render key derived from the confirmed selection.
    pub key: Option<String>,
    /// Visible panel, `None` while unresolved.
    pub panel: Option<&'a Panel<C>>,
    /// Transition wrapping the panel, only when animation is on.
    pub transition: Option<&'a str>,
    /// Keys kept alive while hidden, least recently displayed first.
    pub retained: Vec<&'a str>,
}

impl<C> Clone for PanelContent<'_, C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            panel: self.panel,
            transition: self.transition,
            retained: self.retained.clone(),
        }
    }
}

impl<C> PanelContent<'_, C> {
    /// Whether a panel is actually visible.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.panel.is_some()
    }

    /// Whether the hidden panel with `key` should keep its rendered state.
    #[must_use]
    pub fn is_retained(&self, key: &str) -> bool {
        self.retained.contains(&key)
    }
}

impl<C> NavigationEngine<C> {
    /// Content to render, or `None` when there are no panels.
    ///
    /// Read fresh on every call; nothing here is cached between changes.
    #[must_use]
    pub fn content(&self) -> Option<PanelContent<'_, C>> {
        if self.panels().is_empty() {
            return None;
        }
        let transition = if self.config().animated {
            self.transition_name()
        } else {
            None
        };
        Some(PanelContent {
            key: self.selection().map(PanelName::content_key),
            panel: visible_panel(self.panels(), self.current_index()),
            transition,
            retained: self.retention().map(|r| r.keys()).unwrap_or_default(),
        })
    }
}
