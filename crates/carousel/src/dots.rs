//! The three-dot page indicator.
//!
//! The indicator always has exactly [`DOT_COUNT`] dots. They are fixed
//! slots relative to the current position, not page numbers: the left dot
//! steps back, the right dot steps forward and the centre dot marks where
//! the carousel is.

use crate::state::CarouselState;

/// Number of dots rendered, whatever the slide count.
pub const DOT_COUNT: usize = 3;

/// One of the three indicator slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotSlot {
    /// Left dot, equivalent to the "previous" arrow.
    Previous,
    /// Centre dot, inert.
    Current,
    /// Right dot, equivalent to the "next" arrow.
    Next,
}

impl DotSlot {
    /// The slots in rendering order.
    pub const ALL: [Self; DOT_COUNT] = [Self::Previous, Self::Current, Self::Next];

    /// Returns the slot rendered at `position` (0, 1 or 2).
    #[must_use]
    pub fn at(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    /// Returns a short lowercase name, used in markup attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Previous => "prev",
            Self::Current => "current",
            Self::Next => "next",
        }
    }
}

/// How one dot should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    /// Which slot this dot occupies.
    pub slot: DotSlot,
    /// Whether clicking the dot would move the carousel.
    pub enabled: bool,
    /// Whether the dot is highlighted.
    pub active: bool,
}

/// Derives the three dots for a state.
///
/// # Examples
///
/// ```
/// use plaudit_carousel::{CarouselState, DotSlot, dots_for};
///
/// let dots = dots_for(&CarouselState::new(100, 3, 200.0, true));
/// assert_eq!(dots.len(), 3);
/// assert!(!dots[0].enabled);
/// assert!(dots[1].active);
/// assert_eq!(dots[2].slot, DotSlot::Next);
/// ```
#[must_use]
pub fn dots_for(state: &CarouselState) -> [Dot; DOT_COUNT] {
    DotSlot::ALL.map(|slot| Dot {
        slot,
        enabled: match slot {
            DotSlot::Previous => state.can_go_prev(),
            DotSlot::Current => false,
            DotSlot::Next => state.can_go_next(),
        },
        active: slot == DotSlot::Current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_map_to_slots() {
        assert_eq!(DotSlot::at(0), Some(DotSlot::Previous));
        assert_eq!(DotSlot::at(2), Some(DotSlot::Next));
        assert_eq!(DotSlot::at(3), None);
    }

    #[test]
    fn single_page_disables_both_sides() {
        let dots = dots_for(&CarouselState::new(2, 2, 100.0, true));
        assert!(dots.iter().all(|dot| !dot.enabled));
    }
}
