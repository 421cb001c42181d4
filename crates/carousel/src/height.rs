//! Card height synchronization.
//!
//! Only the visible slides are measured and only they receive the shared
//! minimum height, so paging between short and tall cards does not jump.

use std::ops::Range;

/// Returns `[index, index + visible) ∩ [0, slide_count)`.
///
/// # Examples
///
/// ```
/// use plaudit_carousel::visible_range;
///
/// assert_eq!(visible_range(2, 3, 10), 2..5);
/// assert_eq!(visible_range(8, 3, 10), 8..10);
/// assert_eq!(visible_range(0, 3, 0), 0..0);
/// ```
#[must_use]
pub fn visible_range(index: usize, visible: usize, slide_count: usize) -> Range<usize> {
    let start = index.min(slide_count);
    let end = index.saturating_add(visible).min(slide_count);
    start..end
}

/// A min-height to apply to a range of slides.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightSync {
    /// Slides that receive the height.
    pub range: Range<usize>,
    /// Tallest measured height among them.
    pub min_height_px: f32,
}

impl HeightSync {
    /// Computes the sync for `range` from per-slide measured heights.
    ///
    /// Returns `None` when the range is empty or inverted, or none of its
    /// slides has been measured. Slides outside the range never affect the
    /// result.
    #[must_use]
    pub fn compute(range: Range<usize>, heights: &[f32]) -> Option<Self> {
        let min_height_px = heights
            .get(range.start..range.end.min(heights.len()))?
            .iter()
            .copied()
            .filter(|height| height.is_finite() && *height > 0.0)
            .reduce(f32::max)?;
        Some(Self {
            range,
            min_height_px,
        })
    }

    /// Returns the min-height for slide `index`, if it is in the range.
    #[must_use]
    pub fn height_for(&self, index: usize) -> Option<f32> {
        self.range.contains(&index).then_some(self.min_height_px)
    }
}
