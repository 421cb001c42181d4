//! Badge variant: the aggregate rating with a few snippets.

use plaudit_protocol::{AggregateRating, Layout, ReviewRecord, truncate};

use crate::components::{read_more, review_count_label, stars};
use crate::context::RenderContext;
use crate::markup::Element;

/// Number of review snippets shown under the aggregate.
pub const MAX_SNIPPETS: usize = 3;

/// Renders the badge.
#[must_use]
pub fn render(
    reviews: &[&ReviewRecord],
    aggregate: AggregateRating,
    total_reviews: usize,
    business_url: Option<&str>,
    ctx: &RenderContext,
) -> Element {
    let mut summary = Element::new("div").class("plaudit-badge-summary");
    if ctx.config.show_ratings {
        summary = summary.child(
            Element::new("span")
                .class("plaudit-badge-value")
                .text(aggregate.headline()),
        );
        if let AggregateRating::Stars { average, .. } = aggregate {
            summary = summary.child(stars(average));
        }
    }
    summary = summary.child(
        Element::new("span")
            .class("plaudit-review-count")
            .text(review_count_label(total_reviews)),
    );

    let snippets = reviews.iter().take(MAX_SNIPPETS).enumerate().map(|(index, review)| {
        let body = truncate(review.body(), Layout::Badge.truncate_at());
        let mut snippet = Element::new("blockquote")
            .class("plaudit-snippet")
            .attr("data-index", index.to_string())
            .child(Element::new("p").text(body.text));
        if body.truncated {
            snippet = snippet.child(read_more(index));
        }
        snippet.child(Element::new("cite").text(review.author.as_str()))
    });

    let mut badge = Element::new("div")
        .class("plaudit-badge")
        .child(summary)
        .child(Element::new("div").class("plaudit-snippets").children(snippets));
    if let Some(url) = business_url.filter(|url| !url.is_empty()) {
        badge = badge.child(
            Element::new("a")
                .class("plaudit-see-all")
                .attr("href", url)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text("See all reviews"),
        );
    }
    badge
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use plaudit_config::WidgetConfig;
    use plaudit_protocol::WidgetPayload;

    #[test]
    fn at_most_three_snippets() {
        let reviews: Vec<ReviewRecord> = (0..6)
            .map(|i| ReviewRecord::new(format!("R{i}"), 4.0, "Nice"))
            .collect();
        let refs: Vec<&ReviewRecord> = reviews.iter().collect();
        let ctx = RenderContext::new(WidgetConfig::new("w"), "c", &WidgetPayload::default(), Utc::now());
        let aggregate = AggregateRating::Stars {
            average: 4.0,
            count: 6,
        };

        let badge = render(&refs, aggregate, 6, Some("https://example.com"), &ctx);
        assert_eq!(badge.find_all_by_class("plaudit-snippet").len(), MAX_SNIPPETS);
        assert!(badge.find_by_class("plaudit-see-all").is_some());
    }

    #[test]
    fn truncated_snippet_offers_read_more() {
        let long = "y".repeat(Layout::Badge.truncate_at() + 1);
        let reviews = [
            ReviewRecord::new("Short", 5.0, "Great"),
            ReviewRecord::new("Long", 5.0, long),
        ];
        let refs: Vec<&ReviewRecord> = reviews.iter().collect();
        let ctx = RenderContext::new(WidgetConfig::new("w"), "c", &WidgetPayload::default(), Utc::now());
        let aggregate = AggregateRating::Stars {
            average: 5.0,
            count: 2,
        };

        let badge = render(&refs, aggregate, 2, None, &ctx);
        let buttons = badge.find_all_by_class("plaudit-read-more");

        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].get_attr("data-review-index"), Some("1"));
    }
}
