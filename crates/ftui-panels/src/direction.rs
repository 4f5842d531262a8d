#![forbid(unsafe_code)]

//! Direction policy: movement direction and transition naming.
//!
//! Direction is derived from *resolved* indices, never from raw selection
//! values. The transition name is chosen from the direction, the orientation,
//! and the caller's overrides, then prefixed with [`TRANSITION_NAMESPACE`] so
//! the render surface can tell it apart from unrelated animation names.

/// Prefix carried by every transition name the engine produces.
pub const TRANSITION_NAMESPACE: &str = "ftui-transition--";

/// Semantic direction of a move between two panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the start of the list.
    Backward,
    /// No movement, or movement into the unresolved state.
    #[default]
    None,
    /// Towards the end of the list.
    Forward,
}

impl Direction {
    /// Signed unit offset: -1, 0, or +1.
    #[must_use]
    pub const fn offset(self) -> i32 {
        match self {
            Self::Backward => -1,
            Self::None => 0,
            Self::Forward => 1,
        }
    }

    /// Direction from a signed offset.
    #[must_use]
    pub const fn from_offset(offset: i32) -> Self {
        if offset < 0 {
            Self::Backward
        } else if offset > 0 {
            Self::Forward
        } else {
            Self::None
        }
    }
}

/// Direction of a move from `old` to `new`.
///
/// Moving into the unresolved state has no direction, and neither does
/// staying put. Moving out of the unresolved state counts as forward.
#[must_use]
pub fn direction_between(old: Option<usize>, new: Option<usize>) -> Direction {
    let Some(new) = new else {
        return Direction::None;
    };
    match old {
        Some(old) if new == old => Direction::None,
        Some(old) if new < old => Direction::Backward,
        _ => Direction::Forward,
    }
}

/// Transition naming inputs, borrowed from the panel configuration.
#[derive(Debug, Clone, Copy)]
pub struct TransitionPolicy<'a> {
    /// Whether transitions play at all.
    pub animated: bool,
    /// Vertical orientation flips the default slide axis.
    pub vertical: bool,
    /// Override for backward moves.
    pub prev: Option<&'a str>,
    /// Override for forward moves.
    pub next: Option<&'a str>,
}

impl TransitionPolicy<'_> {
    /// Default backward transition for the orientation.
    #[must_use]
    pub const fn default_prev(vertical: bool) -> &'static str {
        if vertical { "slide-down" } else { "slide-right" }
    }

    /// Default forward transition for the orientation.
    #[must_use]
    pub const fn default_next(vertical: bool) -> &'static str {
        if vertical { "slide-up" } else { "slide-left" }
    }

    /// Transition name for a move in `direction`.
    ///
    /// `current` is the index *before* the move applies; moves out of the
    /// unresolved state never animate.
    #[must_use]
    pub fn transition_name_for(
        &self,
        direction: Direction,
        current: Option<usize>,
    ) -> Option<String> {
        if !self.animated || current.is_none() {
            return None;
        }
        let name = match direction {
            Direction::None => return None,
            Direction::Backward => {
                non_empty(self.prev).unwrap_or(Self::default_prev(self.vertical))
            }
            Direction::Forward => {
                non_empty(self.next).unwrap_or(Self::default_next(self.vertical))
            }
        };
        Some(format!("{TRANSITION_NAMESPACE}{name}"))
    }
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}
