//! Review cards.

use chrono::{DateTime, Utc};
use plaudit_config::WidgetConfig;
use plaudit_protocol::{
    Layout, RecommendationStatus, ReviewRecord, SourceHints, initials, star_fills, truncate,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

/// Color of filled stars.
pub const STAR_COLOR: Color = Color::Yellow;

/// What a card needs besides the review itself.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    /// Display options.
    pub config: &'a WidgetConfig,
    /// Source-detection hints.
    pub hints: &'a SourceHints,
    /// Reference time for relative dates.
    pub now: DateTime<Utc>,
}

/// The rating line of a review: stars, or a recommendation for sources
/// without star ratings.
#[must_use]
pub fn rating_line(review: &ReviewRecord, hints: &SourceHints) -> Option<Line<'static>> {
    let source = review.resolve_source(hints);
    if source.uses_star_rating() || review.recommendation_status.is_none() {
        let stars: String = star_fills(review.clamped_rating()?)
            .iter()
            .map(|fill| fill.glyph())
            .collect();
        return Some(Line::from(Span::styled(stars, Style::default().fg(STAR_COLOR))));
    }

    let (label, color) = match review.recommendation_status {
        Some(RecommendationStatus::NotRecommended) => ("✗ Doesn't recommend", Color::Red),
        _ => ("✓ Recommends", Color::Green),
    };
    Some(Line::from(Span::styled(label, Style::default().fg(color))))
}

/// The title of a card: initials and author.
#[must_use]
pub fn card_title(review: &ReviewRecord, show_avatars: bool) -> String {
    if show_avatars {
        format!(" ({}) {} ", initials(&review.author), review.author)
    } else {
        format!(" {} ", review.author)
    }
}

/// Renders one review card.
///
/// The body is truncated the way the carousel truncates it; a truncated
/// body ends with a "Read more" hint (Enter opens the full review).
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use plaudit_config::WidgetConfig;
/// use plaudit_protocol::{ReviewRecord, SourceHints};
/// use plaudit_tui::widgets::{CardContext, render_card};
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let config = WidgetConfig::new("w");
/// let hints = SourceHints::default();
/// let ctx = CardContext { config: &config, hints: &hints, now: Utc::now() };
/// let area = Rect::new(0, 0, 30, 8);
/// let mut buf = Buffer::empty(area);
///
/// render_card(&ReviewRecord::new("Ana Bell", 5.0, "Lovely"), false, &ctx, area, &mut buf);
/// ```
pub fn render_card(
    review: &ReviewRecord,
    highlighted: bool,
    ctx: &CardContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) {
    let border = if highlighted {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(Span::styled(
            card_title(review, ctx.config.show_avatars),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);

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
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }

    let body = truncate(review.body(), Layout::Carousel.truncate_at());
    lines.push(Line::from(body.text.into_owned()));
    if body.truncated {
        lines.push(Line::from(Span::styled(
            "Read more ⏎",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
