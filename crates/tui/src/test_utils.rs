//! Helpers for rendering tests.

use ratatui::buffer::Buffer;

/// Flattens a buffer to text, one line per row, without trailing spaces.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut text = String::new();
    for y in buf.area.top()..buf.area.bottom() {
        let mut row = String::new();
        for x in buf.area.left()..buf.area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                row.push_str(cell.symbol());
            }
        }
        text.push_str(row.trim_end_matches(' '));
        text.push('\n');
    }
    text
}
