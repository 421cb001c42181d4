//! Layout measurements for the preview.
//!
//! The carousel engine works in pixels. The preview maps one terminal
//! column to [`PX_PER_COLUMN`] pixels so breakpoints and drag thresholds
//! behave at roughly the same scale as in a browser.

/// Pixels represented by one terminal column.
pub const PX_PER_COLUMN: f32 = 10.0;

/// Height of the header bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the arrows and dots row.
pub const CONTROLS_HEIGHT: u16 = 1;

/// Height of the status bar.
pub const STATUS_HEIGHT: u16 = 1;

/// Minimum terminal height for useful rendering.
pub const MIN_HEIGHT: u16 = HEADER_HEIGHT + CONTROLS_HEIGHT + STATUS_HEIGHT + 6;

/// Minimum terminal width: one card of 30 columns.
pub const MIN_WIDTH: u16 = 30;

/// Converts a column count (or column position) to pixels.
///
/// ```
/// use plaudit_tui::layout::columns_to_px;
///
/// assert_eq!(columns_to_px(128), 1280.0);
/// ```
#[must_use]
pub fn columns_to_px(columns: u16) -> f32 {
    f32::from(columns) * PX_PER_COLUMN
}

/// Converts a pixel offset to whole columns, rounding toward zero.
#[must_use]
pub fn px_to_columns(px: f32) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let columns = (px / PX_PER_COLUMN) as i32;
    columns
}
