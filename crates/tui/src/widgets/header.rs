//! Header bar: business name and aggregate rating.

use plaudit_protocol::AggregateRating;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::card::STAR_COLOR;

/// Builds the header line, e.g. `Corner Cafe  ★ 4.4  9 reviews`.
#[must_use]
pub fn header_line(
    business_name: Option<&str>,
    aggregate: &AggregateRating,
    review_count: usize,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        business_name.unwrap_or("Reviews").to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    let headline = match aggregate {
        AggregateRating::Stars { .. } => format!("★ {}", aggregate.headline()),
        _ => aggregate.headline(),
    };
    if !headline.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(headline, Style::default().fg(STAR_COLOR)));
    }
    let noun = if review_count == 1 { "review" } else { "reviews" };
    spans.push(Span::styled(
        format!("  {review_count} {noun}"),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

/// Renders the header in a rounded box.
pub fn render_header(
    business_name: Option<&str>,
    aggregate: &AggregateRating,
    review_count: usize,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(" plaudit ", Style::default().fg(Color::Cyan)));
    Paragraph::new(header_line(business_name, aggregate, review_count))
        .block(block)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrated_header_has_no_headline() {
        let line = header_line(None, &AggregateRating::Unrated, 1);
        assert_eq!(line.to_string(), "Reviews  1 review");
    }

    #[test]
    fn rated_header_shows_headline() {
        let aggregate = AggregateRating::Stars {
            average: 4.5,
            count: 2,
        };
        let line = header_line(Some("Corner Cafe"), &aggregate, 12);
        let text = line.to_string();
        assert!(text.starts_with("Corner Cafe  "));
        assert!(text.contains(&aggregate.headline()));
        assert!(text.ends_with("12 reviews"));
    }
}
