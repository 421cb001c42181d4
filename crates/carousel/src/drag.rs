//! Drag physics constants and helpers.
//!
//! A pointer press only becomes a drag once it has moved more than
//! [`DRAG_DEAD_ZONE_PX`]; shorter movements are clicks and must reach the
//! "Read more" buttons inside the slides. While dragging, the track follows
//! the pointer 1:1 inside its bounds and at [`EDGE_RESISTANCE`] beyond them.

/// Movement that turns a press into a drag (exclusive).
pub const DRAG_DEAD_ZONE_PX: f32 = 10.0;

/// Release displacement that commits one slide step (exclusive).
pub const DRAG_COMMIT_PX: f32 = 50.0;

/// Fraction of the overflow applied beyond the track bounds.
pub const EDGE_RESISTANCE: f32 = 0.3;

/// Returns `true` once a displacement leaves the dead zone.
#[must_use]
pub fn exceeds_dead_zone(dx: f32) -> bool {
    dx.abs() > DRAG_DEAD_ZONE_PX
}

/// Applies edge resistance to a raw translation.
///
/// `min_translate` is the translation of the last valid index (a negative
/// number or zero) and `0.0` is the translation of the first.
///
/// # Examples
///
/// ```
/// use plaudit_carousel::drag::resisted_translate;
///
/// // Inside the bounds the track follows the pointer.
/// assert_eq!(resisted_translate(-150.0, -600.0), -150.0);
/// // 100px past the start only moves 30px, likewise past the end.
/// assert!((resisted_translate(100.0, -600.0) - 30.0).abs() < 1e-3);
/// assert!((resisted_translate(-700.0, -600.0) + 630.0).abs() < 1e-3);
/// ```
#[must_use]
pub fn resisted_translate(raw: f32, min_translate: f32) -> f32 {
    if raw > 0.0 {
        raw * EDGE_RESISTANCE
    } else if raw < min_translate {
        min_translate + (raw - min_translate) * EDGE_RESISTANCE
    } else {
        raw
    }
}

/// What a released drag does to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Released past the first slide: go to index 0.
    SnapToStart,
    /// Released past the last valid index: go there.
    SnapToEnd,
    /// Dragged left far enough: one step forward.
    StepForward,
    /// Dragged right far enough: one step back.
    StepBack,
    /// Not far enough: return to the current slide.
    SnapBack,
}

/// Classifies a drag release.
///
/// `raw` is the unresisted translation at release and `dx` the pointer
/// displacement. Boundary snapping takes precedence over the commit
/// threshold and only applies once slides have a measured width.
#[must_use]
pub fn classify_release(raw: f32, dx: f32, min_translate: f32, slide_width_px: f32) -> ReleaseOutcome {
    if slide_width_px > 0.0 {
        if raw > 0.0 {
            return ReleaseOutcome::SnapToStart;
        }
        if raw < min_translate {
            return ReleaseOutcome::SnapToEnd;
        }
    }

    if dx < -DRAG_COMMIT_PX {
        ReleaseOutcome::StepForward
    } else if dx > DRAG_COMMIT_PX {
        ReleaseOutcome::StepBack
    } else {
        ReleaseOutcome::SnapBack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_zone_is_exclusive() {
        assert!(!exceeds_dead_zone(10.0));
        assert!(!exceeds_dead_zone(-10.0));
        assert!(exceeds_dead_zone(10.5));
        assert!(exceeds_dead_zone(-11.0));
    }

    #[test]
    fn commit_threshold_is_exclusive() {
        assert_eq!(
            classify_release(-350.0, -50.0, -600.0, 300.0),
            ReleaseOutcome::SnapBack
        );
        assert_eq!(
            classify_release(-351.0, -51.0, -600.0, 300.0),
            ReleaseOutcome::StepForward
        );
        assert_eq!(
            classify_release(-249.0, 51.0, -600.0, 300.0),
            ReleaseOutcome::StepBack
        );
    }

    #[test]
    fn boundary_wins_over_threshold() {
        assert_eq!(
            classify_release(20.0, 20.0, -600.0, 300.0),
            ReleaseOutcome::SnapToStart
        );
        assert_eq!(
            classify_release(-640.0, -40.0, -600.0, 300.0),
            ReleaseOutcome::SnapToEnd
        );
    }

    #[test]
    fn unmeasured_slides_skip_boundary_snap() {
        assert_eq!(
            classify_release(80.0, 80.0, 0.0, 0.0),
            ReleaseOutcome::StepBack
        );
    }
}
