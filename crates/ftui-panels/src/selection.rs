#![forbid(unsafe_code)]

//! Selection resolution: selection value to list index.

use crate::name::PanelName;
use crate::registry::Panel;

/// Whether a selection value can address a panel.
///
/// `None` and the empty text name are rejected; `0` and `false` are valid.
#[must_use]
pub fn is_valid_name(name: Option<&PanelName>) -> bool {
    name.is_some_and(|n| !n.is_empty_text())
}

/// Index of the first enabled panel named `name`.
///
/// Disabled panels never resolve, even when the name matches. Duplicate names
/// resolve to the first enabled match.
#[must_use]
pub fn index_of<C>(name: Option<&PanelName>, panels: &[Panel<C>]) -> Option<usize> {
    if !is_valid_name(name) {
        return None;
    }
    let name = name?;
    panels
        .iter()
        .position(|panel| panel.name() == name && panel.is_enabled())
}
