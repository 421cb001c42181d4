//! The review detail modal.

use plaudit_protocol::ReviewRecord;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::card::{CardContext, card_title, rating_line};
use super::centered_rect;

/// Preferred modal size.
const MODAL_WIDTH: u16 = 70;
const MODAL_HEIGHT: u16 = 20;

/// Renders the full review centered over `area`.
///
/// Unlike a card, the body is never truncated.
pub fn render_review_modal(
    review: &ReviewRecord,
    ctx: &CardContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) {
    let popup = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
    Clear.render(popup, buf);

    let mut lines = Vec::new();
    if ctx.config.show_ratings
        && let Some(rating) = rating_line(review, ctx.hints)
    {
        lines.push(rating);
    }
    if ctx.config.show_dates
        && let Some(posted) = &review.posted_at
    {
        lines.push(Line::from(Span::styled(
            posted.display(ctx.now),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(review.body().trim().to_string()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let block = Block::default()
        .title(Span::styled(
            card_title(review, ctx.config.show_avatars),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Cyan));

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use plaudit_config::WidgetConfig;
    use plaudit_protocol::SourceHints;

    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn shows_the_untruncated_body() {
        let body = format!("{} the end", "lorem ipsum ".repeat(40));
        let review = ReviewRecord::new("Ana", 5.0, body);
        let config = WidgetConfig::new("w");
        let hints = SourceHints::default();
        let ctx = CardContext {
            config: &config,
            hints: &hints,
            now: Utc::now(),
        };
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);

        render_review_modal(&review, &ctx, area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.contains("the end"));
        assert!(text.contains("Esc to close"));
        assert!(!text.contains("..."));
    }
}
