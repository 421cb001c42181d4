//! Help overlay listing the key bindings.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;

const HELP_WIDTH: u16 = 38;
const HELP_HEIGHT: u16 = 16;

const BINDINGS: &[(&str, &str)] = &[
    ("←  →", "Previous / next slide"),
    ("[  ]", "Left / right dot"),
    ("drag", "Swipe the track"),
    ("Enter", "Read first visible review"),
    ("Esc", "Close modal or help"),
    ("?", "Toggle help"),
    ("q", "Quit"),
];

/// Renders the help overlay centered in `area`.
///
/// ```
/// use ratatui::{buffer::Buffer, layout::Rect};
/// use plaudit_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(HELP_WIDTH, HELP_HEIGHT, area);
    Clear.render(popup, buf);

    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::White);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Carousel",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(BINDINGS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {key:<8}"), key_style),
            Span::styled(*action, text_style),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Autoplay pauses while hovered",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn lists_every_binding() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_help_overlay(area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.contains("Help"));
        for (_, action) in BINDINGS {
            assert!(text.contains(action), "missing {action}");
        }
    }
}
