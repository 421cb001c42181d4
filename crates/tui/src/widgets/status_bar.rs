//! Footer with key hints and the autoplay state.

use plaudit_carousel::AutoplayController;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Key hints shown on the left.
const HINTS: &[(&str, &str)] = &[
    ("←→", "slide"),
    ("[ ]", "dots"),
    ("⏎", "read"),
    ("?", "help"),
    ("q", "quit"),
];

/// Label for the autoplay state.
///
/// ```
/// use std::time::{Duration, Instant};
/// use plaudit_carousel::AutoplayController;
/// use plaudit_tui::widgets::autoplay_label;
///
/// let mut autoplay = AutoplayController::new(Duration::from_secs(5), true);
/// autoplay.set_eligible(true, Instant::now());
/// assert_eq!(autoplay_label(&autoplay), "▶ autoplay");
/// autoplay.pause();
/// assert_eq!(autoplay_label(&autoplay), "⏸ paused");
/// ```
#[must_use]
pub fn autoplay_label(autoplay: &AutoplayController) -> &'static str {
    if autoplay.is_paused() {
        "⏸ paused"
    } else if autoplay.is_running() {
        "▶ autoplay"
    } else {
        ""
    }
}

/// Renders the status bar.
pub fn render_status_bar(autoplay: &AutoplayController, area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    for (key, action) in HINTS {
        spans.push(Span::styled(format!(" {key} "), key_style));
        spans.push(Span::styled(format!("{action} "), text_style));
    }

    let label = autoplay_label(autoplay);
    let label_width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
    let [hints_area, state_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(label_width + 1)]).areas(area);
    Paragraph::new(Line::from(spans)).render(hints_area, buf);
    Paragraph::new(Span::styled(label, Style::default().fg(Color::Cyan))).render(state_area, buf);
}
