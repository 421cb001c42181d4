//! Arrows and the three-dot indicator.

use plaudit_carousel::{CarouselView, Dot};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Glyph and style of one dot.
///
/// ```
/// use plaudit_carousel::{Dot, DotSlot};
/// use plaudit_tui::widgets::dot_glyph;
///
/// let active = Dot { slot: DotSlot::Current, enabled: true, active: true };
/// assert_eq!(dot_glyph(&active).0, '●');
/// ```
#[must_use]
pub fn dot_glyph(dot: &Dot) -> (char, Style) {
    if dot.active {
        ('●', Style::default().fg(Color::Cyan))
    } else if dot.enabled {
        ('○', Style::default().fg(Color::White))
    } else {
        ('·', Style::default().fg(Color::DarkGray))
    }
}

fn arrow(glyph: &'static str, enabled: bool) -> Span<'static> {
    let color = if enabled { Color::White } else { Color::DarkGray };
    Span::styled(glyph, Style::default().fg(color))
}

/// Builds the controls line: `‹  ○ ● ○  ›`.
#[must_use]
pub fn controls_line(view: &CarouselView) -> Line<'static> {
    let mut spans = vec![arrow("‹", view.can_prev), Span::raw("  ")];
    for (position, dot) in view.dots.iter().enumerate() {
        if position > 0 {
            spans.push(Span::raw(" "));
        }
        let (glyph, style) = dot_glyph(dot);
        spans.push(Span::styled(glyph.to_string(), style));
    }
    spans.push(Span::raw("  "));
    spans.push(arrow("›", view.can_next));
    Line::from(spans)
}

/// Renders the controls centered in `area`.
pub fn render_controls(view: &CarouselView, area: Rect, buf: &mut Buffer) {
    Paragraph::new(controls_line(view))
        .alignment(Alignment::Center)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaudit_carousel::CarouselState;

    #[test]
    fn first_page_without_loop() {
        let state = CarouselState::new(6, 2, 300.0, false);
        let line = controls_line(&CarouselView::from(&state));
        assert_eq!(line.to_string(), "‹  · ● ○  ›");
        assert_eq!(line.spans[0].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn middle_page_enables_both_sides() {
        let state = CarouselState::new(6, 2, 300.0, false)
            .apply(plaudit_carousel::CarouselEvent::Next);
        let line = controls_line(&CarouselView::from(&state));
        assert_eq!(line.to_string(), "‹  ○ ● ○  ›");
    }
}
