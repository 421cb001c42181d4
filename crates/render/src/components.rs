//! Building blocks shared by the layout variants.

use plaudit_protocol::{
    AggregateRating, Layout, RecommendationStatus, ReviewRecord, Source, StarFill, initials,
    star_fills, truncate,
};

use crate::context::RenderContext;
use crate::markup::Element;

/// Renders five stars for a rating.
///
/// # Examples
///
/// ```
/// use plaudit_render::components::stars;
///
/// let html = stars(4.5).to_html();
/// assert!(html.starts_with(r#"<span class="plaudit-stars" role="img" aria-label="Rated 4.5 out of 5">"#));
/// assert_eq!(html.matches("plaudit-star--full").count(), 4);
/// assert_eq!(html.matches("plaudit-star--half").count(), 1);
/// ```
#[must_use]
pub fn stars(rating: f32) -> Element {
    let stars = star_fills(rating).into_iter().map(|fill| {
        let modifier = match fill {
            StarFill::Full => "plaudit-star--full",
            StarFill::Half => "plaudit-star--half",
            StarFill::Empty => "plaudit-star--empty",
        };
        Element::new("span")
            .class("plaudit-star")
            .class(modifier)
            .text(fill.glyph().to_string())
    });

    Element::new("span")
        .class("plaudit-stars")
        .attr("role", "img")
        .attr("aria-label", format!("Rated {} out of 5", format_rating(rating)))
        .children(stars)
}

/// Renders a recommendation badge for sources without stars.
#[must_use]
pub fn recommendation_badge(status: Option<RecommendationStatus>) -> Element {
    let (class, label) = match status {
        Some(RecommendationStatus::NotRecommended) => {
            ("plaudit-recommendation--no", "Doesn't recommend")
        }
        _ => ("plaudit-recommendation--yes", "Recommends"),
    };
    Element::new("span")
        .class("plaudit-recommendation")
        .class(class)
        .text(label)
}

/// Renders the rating of one review according to its source.
#[must_use]
pub fn review_rating(review: &ReviewRecord, source: Source) -> Option<Element> {
    if source.uses_star_rating() || review.recommendation_status.is_none() {
        review.clamped_rating().map(stars)
    } else {
        Some(recommendation_badge(review.recommendation_status))
    }
}

/// Renders the avatar image, or an initials placeholder.
#[must_use]
pub fn avatar(review: &ReviewRecord) -> Element {
    match review.profile_picture.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => Element::new("img")
            .class("plaudit-avatar")
            .attr("src", url)
            .attr("alt", review.author.as_str())
            .attr("loading", "lazy"),
        None => Element::new("span")
            .class("plaudit-avatar")
            .class("plaudit-avatar--initials")
            .attr("aria-hidden", "true")
            .text(initials(&review.author)),
    }
}

/// Renders a review card for `layout`.
///
/// The body is truncated at the layout's threshold; truncated cards get a
/// "Read more" button carrying the review index so the host can open the
/// detail modal.
#[must_use]
pub fn review_card(review: &ReviewRecord, index: usize, layout: Layout, ctx: &RenderContext) -> Element {
    let config = &ctx.config;
    let source = review.resolve_source(&ctx.hints);
    let body = truncate(review.body(), layout.truncate_at());

    let mut meta = Element::new("div")
        .class("plaudit-card-meta")
        .child(Element::new("span").class("plaudit-author").text(review.author.as_str()));
    if config.show_dates
        && let Some(posted) = &review.posted_at
    {
        let date = posted.display(ctx.now);
        if !date.is_empty() {
            meta = meta.child(Element::new("span").class("plaudit-date").text(date));
        }
    }

    let mut header = Element::new("div").class("plaudit-card-header");
    if config.show_avatars {
        header = header.child(avatar(review));
    }
    header = header.child(meta).child(
        Element::new("span")
            .class("plaudit-source")
            .attr("data-source", source.as_str())
            .attr("title", source_label(source)),
    );

    let mut card = Element::new("article")
        .class("plaudit-card")
        .attr("data-index", index.to_string())
        .child(header);
    if config.show_ratings
        && let Some(rating) = review_rating(review, source)
    {
        card = card.child(rating);
    }
    card = card.child(Element::new("p").class("plaudit-card-body").text(body.text));
    if body.truncated {
        card = card.child(read_more(index));
    }
    card
}

/// The "Read more" button that opens the detail modal for review `index`.
#[must_use]
pub fn read_more(index: usize) -> Element {
    Element::new("button")
        .class("plaudit-read-more")
        .attr("type", "button")
        .attr("data-review-index", index.to_string())
        .text("Read more")
}

/// Renders the widget header: business name, aggregate rating and count.
#[must_use]
pub fn header(
    business_name: Option<&str>,
    business_url: Option<&str>,
    aggregate: AggregateRating,
    total_reviews: usize,
    ctx: &RenderContext,
) -> Element {
    let mut header = Element::new("header").class("plaudit-header");

    if let Some(name) = business_name.filter(|name| !name.trim().is_empty()) {
        let title = match business_url.filter(|url| !url.is_empty()) {
            Some(url) => Element::new("a")
                .attr("href", url)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text(name),
            None => Element::new("span").text(name),
        };
        header = header.child(Element::new("h2").class("plaudit-business-name").child(title));
    }

    if ctx.config.show_ratings {
        let mut summary = Element::new("div").class("plaudit-summary");
        match aggregate {
            AggregateRating::Stars { average, .. } => {
                summary = summary
                    .child(
                        Element::new("span")
                            .class("plaudit-rating-value")
                            .text(aggregate.headline()),
                    )
                    .child(stars(average));
            }
            AggregateRating::Recommendation { .. } => {
                summary = summary.child(
                    Element::new("span")
                        .class("plaudit-rating-value")
                        .text(aggregate.headline()),
                );
            }
            AggregateRating::Unrated => {}
        }
        header = header.child(summary);
    }

    header.child(
        Element::new("span")
            .class("plaudit-review-count")
            .text(review_count_label(total_reviews)),
    )
}

/// Renders the "no reviews" state.
#[must_use]
pub fn empty_state() -> Element {
    Element::new("div")
        .class("plaudit-empty")
        .child(Element::new("p").text("No reviews to display yet."))
}

/// Renders the inline error block with a retry button.
///
/// ```
/// use plaudit_render::components::error_block;
///
/// let block = error_block("Couldn't load reviews.");
/// assert!(block.find_by_class("plaudit-retry").is_some());
/// assert_eq!(block.get_attr("role"), Some("alert"));
/// ```
#[must_use]
pub fn error_block(message: &str) -> Element {
    Element::new("div")
        .class("plaudit-error")
        .attr("role", "alert")
        .child(Element::new("p").text(message))
        .child(
            Element::new("button")
                .class("plaudit-retry")
                .attr("type", "button")
                .attr("data-action", "retry")
                .text("Try again"),
        )
}

/// "Based on 1 review" / "Based on 12 reviews".
#[must_use]
pub fn review_count_label(count: usize) -> String {
    if count == 1 {
        "Based on 1 review".to_string()
    } else {
        format!("Based on {count} reviews")
    }
}

const fn source_label(source: Source) -> &'static str {
    match source {
        Source::Google => "Google review",
        Source::Facebook => "Facebook recommendation",
    }
}

fn format_rating(rating: f32) -> String {
    let rating = rating.clamp(0.0, 5.0);
    if rating.fract() == 0.0 {
        format!("{rating:.0}")
    } else {
        format!("{rating:.1}")
    }
}
