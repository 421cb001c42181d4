//! The carousel state machine.
//!
//! [`CarouselState::apply`] is a pure transition function: it takes the
//! current state and one [`CarouselEvent`] and returns the next state. It
//! never touches a screen; hosts render the derived
//! [`CarouselView`](crate::CarouselView).
//!
//! # Index movement
//!
//! With `loop_slides` on, `Next` from the last valid index wraps to 0 while
//! `Prev` from 0 stays at 0. With it off, both directions clamp to
//! `0..=max_index()`, autoplay included.
//!
//! # Examples
//!
//! ```
//! use plaudit_carousel::{CarouselEvent, CarouselState};
//!
//! let state = CarouselState::new(6, 2, 300.0, true);
//! assert_eq!(state.max_index(), 4);
//!
//! let last = state.apply(CarouselEvent::GoTo(4));
//! assert_eq!(last.apply(CarouselEvent::Next).current_index, 0);
//! assert_eq!(state.apply(CarouselEvent::Prev).current_index, 0);
//! ```

use crate::dots::DotSlot;
use crate::drag::{self, ReleaseOutcome};

/// An input to the carousel state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// The "next" arrow was clicked.
    Next,
    /// The "previous" arrow was clicked.
    Prev,
    /// One of the three indicator dots was clicked.
    Dot(DotSlot),
    /// Jump to an index (clamped).
    GoTo(usize),
    /// The autoplay timer fired. Moves like `Next`, and is ignored while a
    /// pointer is pressed so a tick cannot swallow the start of a swipe.
    AutoplayTick,
    /// The viewport or container was resized.
    Resize {
        /// New visible slide count (already clamped by the caller).
        visible_slides: usize,
        /// New width of one slide.
        slide_width_px: f32,
    },
    /// The number of slides changed.
    SlideCountChanged(usize),
    /// A pointer (mouse or touch) was pressed on the track.
    PointerDown {
        /// Horizontal pointer position.
        x: f32,
    },
    /// The pressed pointer moved.
    PointerMove {
        /// Horizontal pointer position.
        x: f32,
    },
    /// The pressed pointer was released.
    PointerUp {
        /// Horizontal pointer position.
        x: f32,
    },
    /// The pointer interaction was interrupted (e.g. left the window).
    PointerCancel,
}

impl CarouselEvent {
    /// Returns `true` for events a user triggers by clicking navigation.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(self, Self::Next | Self::Prev | Self::Dot(_) | Self::GoTo(_))
    }
}

/// The state of one carousel.
///
/// Invariant: outside a drag, `current_translate_px == committed_translate_px
/// == -(current_index as f32) * slide_width_px`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    /// Total number of slides.
    pub slide_count: usize,
    /// Slides shown side by side, in `1..=max(slide_count, 1)`.
    pub visible_slides: usize,
    /// Width of one slide in pixels.
    pub slide_width_px: f32,
    /// Whether `Next` wraps from the last page to the first.
    pub loop_slides: bool,
    /// Index of the first visible slide.
    pub current_index: usize,
    /// Whether the pointer moved past the dead zone.
    pub is_dragging: bool,
    /// Where the pointer was pressed, while it is pressed.
    pub pointer_start_x: Option<f32>,
    /// Translation currently applied to the track.
    pub current_translate_px: f32,
    /// Translation of the current index.
    pub committed_translate_px: f32,
}

impl CarouselState {
    /// Creates a state at index 0.
    #[must_use]
    pub fn new(slide_count: usize, visible_slides: usize, slide_width_px: f32, loop_slides: bool) -> Self {
        Self {
            slide_count,
            visible_slides: visible_slides.clamp(1, slide_count.max(1)),
            slide_width_px: slide_width_px.max(0.0),
            loop_slides,
            current_index: 0,
            is_dragging: false,
            pointer_start_x: None,
            current_translate_px: 0.0,
            committed_translate_px: 0.0,
        }
    }

    /// The last index that still fills every visible position.
    #[must_use]
    pub const fn max_index(&self) -> usize {
        self.slide_count.saturating_sub(self.visible_slides)
    }

    /// Translation of the last valid index.
    #[must_use]
    pub fn min_translate(&self) -> f32 {
        0.0 - self.max_index() as f32 * self.slide_width_px
    }

    /// Returns `true` if `Prev` would move.
    #[must_use]
    pub const fn can_go_prev(&self) -> bool {
        self.current_index > 0
    }

    /// Returns `true` if `Next` would move.
    #[must_use]
    pub const fn can_go_next(&self) -> bool {
        let max = self.max_index();
        if self.loop_slides {
            max > 0
        } else {
            self.current_index < max
        }
    }

    /// Applies one event and returns the next state.
    #[must_use]
    pub fn apply(self, event: CarouselEvent) -> Self {
        match event {
            CarouselEvent::Next => self.step_forward(self.loop_slides),
            CarouselEvent::Prev => self.settle_at(self.current_index.saturating_sub(1)),
            CarouselEvent::Dot(slot) => match slot {
                DotSlot::Previous => self.apply(CarouselEvent::Prev),
                DotSlot::Current => self,
                DotSlot::Next => self.apply(CarouselEvent::Next),
            },
            CarouselEvent::GoTo(index) => self.settle_at(index),
            CarouselEvent::AutoplayTick if self.pointer_start_x.is_some() => self,
            CarouselEvent::AutoplayTick => self.step_forward(self.loop_slides),
            CarouselEvent::Resize {
                visible_slides,
                slide_width_px,
            } => Self {
                visible_slides: visible_slides.clamp(1, self.slide_count.max(1)),
                slide_width_px: slide_width_px.max(0.0),
                ..self.release_pointer()
            }
            .settle_at(self.current_index),
            CarouselEvent::SlideCountChanged(slide_count) => Self {
                slide_count,
                visible_slides: self.visible_slides.clamp(1, slide_count.max(1)),
                ..self.release_pointer()
            }
            .settle_at(self.current_index),
            CarouselEvent::PointerDown { x } => Self {
                pointer_start_x: Some(x),
                is_dragging: false,
                current_translate_px: self.committed_translate_px,
                ..self
            },
            CarouselEvent::PointerMove { x } => self.track_pointer(x),
            CarouselEvent::PointerUp { x } => self.release(x),
            CarouselEvent::PointerCancel => self.release_pointer().settle_at(self.current_index),
        }
    }

    /// Moves one step forward, wrapping to 0 past the end when `wrap`.
    fn step_forward(self, wrap: bool) -> Self {
        let next = if self.current_index >= self.max_index() {
            if wrap { 0 } else { self.max_index() }
        } else {
            self.current_index + 1
        };
        self.settle_at(next)
    }

    /// Moves to a clamped index with the track at rest.
    fn settle_at(self, index: usize) -> Self {
        let current_index = index.min(self.max_index());
        let translate = 0.0 - current_index as f32 * self.slide_width_px;
        Self {
            current_index,
            is_dragging: false,
            pointer_start_x: None,
            current_translate_px: translate,
            committed_translate_px: translate,
            ..self
        }
    }

    fn release_pointer(self) -> Self {
        Self {
            is_dragging: false,
            pointer_start_x: None,
            ..self
        }
    }

    fn track_pointer(self, x: f32) -> Self {
        let Some(start) = self.pointer_start_x else {
            return self;
        };
        let dx = x - start;
        let is_dragging = self.is_dragging || drag::exceeds_dead_zone(dx);
        if !is_dragging {
            return self;
        }

        let raw = self.committed_translate_px + dx;
        Self {
            is_dragging,
            current_translate_px: drag::resisted_translate(raw, self.min_translate()),
            ..self
        }
    }

    fn release(self, x: f32) -> Self {
        let Some(start) = self.pointer_start_x else {
            return self;
        };
        if !self.is_dragging {
            // A click: leave the index alone so slide buttons still work.
            return self.release_pointer();
        }

        let dx = x - start;
        let raw = self.committed_translate_px + dx;
        let target = match drag::classify_release(raw, dx, self.min_translate(), self.slide_width_px) {
            ReleaseOutcome::SnapToStart => 0,
            ReleaseOutcome::SnapToEnd => self.max_index(),
            ReleaseOutcome::StepForward => self.current_index + 1,
            ReleaseOutcome::StepBack => self.current_index.saturating_sub(1),
            ReleaseOutcome::SnapBack => self.current_index,
        };
        self.settle_at(target)
    }
}
