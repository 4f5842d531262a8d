#![forbid(unsafe_code)]

//! Swipe-to-offset translation.
//!
//! The gesture recognizer upstream resolves raw pointer movement into a
//! [`SwipeDirection`]. [`GestureAdapter`] turns that into a unit navigation
//! step for the panel engine.
//!
//! # Rules
//!
//! - Only swipes on the configured axis count: horizontal views ignore
//!   `Up`/`Down`, vertical views ignore `Left`/`Right`.
//! - The natural forward swipe is `Left` (horizontal) or `Up` (vertical): the
//!   content is pushed away to reveal the next panel.
//! - Right-to-left text direction flips the step.

use crate::direction::Direction;

/// Cardinal direction of a recognized swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true for vertical directions.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Returns true for horizontal directions.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Reading direction of the surrounding locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Maps swipes onto navigation steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureAdapter {
    /// Vertical orientation: only `Up`/`Down` are recognized.
    pub vertical: bool,
    /// Locale reading direction.
    pub text_direction: TextDirection,
}

impl GestureAdapter {
    /// Create an adapter for the given orientation and text direction.
    #[must_use]
    pub const fn new(vertical: bool, text_direction: TextDirection) -> Self {
        Self {
            vertical,
            text_direction,
        }
    }

    /// Swipe that moves forward before any text-direction flip.
    #[must_use]
    pub const fn natural_forward(&self) -> SwipeDirection {
        if self.vertical {
            SwipeDirection::Up
        } else {
            SwipeDirection::Left
        }
    }

    /// Navigation step for `swipe`, or `None` when the swipe is off-axis.
    #[must_use]
    pub fn offset_for(&self, swipe: SwipeDirection) -> Option<Direction> {
        let on_axis = if self.vertical {
            swipe.is_vertical()
        } else {
            swipe.is_horizontal()
        };
        if !on_axis {
            return None;
        }
        let forward = match self.text_direction {
            TextDirection::Ltr => self.natural_forward(),
            TextDirection::Rtl => self.natural_forward().opposite(),
        };
        Some(Direction::from_offset(if swipe == forward { 1 } else { -1 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_direction_opposite() {
        assert_eq!(SwipeDirection::Up.opposite(), SwipeDirection::Down);
        assert_eq!(SwipeDirection::Left.opposite(), SwipeDirection::Right);
        for swipe in [SwipeDirection::Down, SwipeDirection::Right] {
            assert_eq!(swipe.opposite().opposite(), swipe);
        }
    }

    #[test]
    fn swipe_direction_axes() {
        assert!(SwipeDirection::Up.is_vertical());
        assert!(SwipeDirection::Down.is_vertical());
        assert!(!SwipeDirection::Left.is_vertical());
        assert!(SwipeDirection::Left.is_horizontal());
        assert!(SwipeDirection::Right.is_horizontal());
        assert!(!SwipeDirection::Up.is_horizontal());
    }

    #[test]
    fn horizontal_ltr() {
        let adapter = GestureAdapter::default();
        assert_eq!(adapter.offset_for(SwipeDirection::Left), Some(Direction::Forward));
        assert_eq!(adapter.offset_for(SwipeDirection::Right), Some(Direction::Backward));
        assert_eq!(adapter.offset_for(SwipeDirection::Up), None);
        assert_eq!(adapter.offset_for(SwipeDirection::Down), None);
    }

    #[test]
    fn horizontal_rtl_flips() {
        let adapter = GestureAdapter::new(false, TextDirection::Rtl);
        assert_eq!(adapter.offset_for(SwipeDirection::Left), Some(Direction::Backward));
        assert_eq!(adapter.offset_for(SwipeDirection::Right), Some(Direction::Forward));
    }

    #[test]
    fn vertical_axis() {
        let adapter = GestureAdapter::new(true, TextDirection::Ltr);
        assert_eq!(adapter.offset_for(SwipeDirection::Up), Some(Direction::Forward));
        assert_eq!(adapter.offset_for(SwipeDirection::Down), Some(Direction::Backward));
        assert_eq!(adapter.offset_for(SwipeDirection::Left), None);
        assert_eq!(adapter.offset_for(SwipeDirection::Right), None);
    }

    #[test]
    fn vertical_rtl_flips() {
        let adapter = GestureAdapter::new(true, TextDirection::Rtl);
        assert_eq!(adapter.offset_for(SwipeDirection::Up), Some(Direction::Backward));
        assert_eq!(adapter.offset_for(SwipeDirection::Down), Some(Direction::Forward));
    }

    #[test]
    fn opposite_swipes_give_opposite_steps() {
        for vertical in [false, true] {
            for text_direction in [TextDirection::Ltr, TextDirection::Rtl] {
                let adapter = GestureAdapter::new(vertical, text_direction);
                let forward = adapter.natural_forward();
                let a = adapter.offset_for(forward).map(Direction::offset);
                let b = adapter.offset_for(forward.opposite()).map(Direction::offset);
                assert_eq!(a.zip(b).map(|(a, b)| a + b), Some(0));
            }
        }
    }
}
