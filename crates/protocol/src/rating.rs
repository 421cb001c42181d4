//! Aggregate ratings and star fills.
//!
//! Star-rated sources aggregate as the arithmetic mean of the ratings that
//! are present. Recommendation-style sources aggregate as the percentage of
//! reviews marked `recommended`.

use crate::review::{ReviewRecord, Source};

/// The aggregate rating shown in a widget header or badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateRating {
    /// Mean star rating rounded to one decimal.
    Stars {
        /// Average rating, `0.0..=5.0`, rounded to one decimal place.
        average: f32,
        /// Number of reviews that carried a rating.
        count: usize,
    },
    /// Percentage of reviewers who recommend the business.
    Recommendation {
        /// Whole-number percentage, `0..=100`.
        percent: u8,
        /// Number of reviews that carried a recommendation status.
        count: usize,
    },
    /// No review carried a rating or a recommendation status.
    Unrated,
}

impl AggregateRating {
    /// Formats the headline value ("4.7" or "92% recommend").
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_protocol::AggregateRating;
    ///
    /// let stars = AggregateRating::Stars { average: 4.0, count: 3 };
    /// assert_eq!(stars.headline(), "4.0");
    ///
    /// let rec = AggregateRating::Recommendation { percent: 92, count: 25 };
    /// assert_eq!(rec.headline(), "92% recommend");
    /// ```
    #[must_use]
    pub fn headline(&self) -> String {
        match self {
            Self::Stars { average, .. } => format!("{average:.1}"),
            Self::Recommendation { percent, .. } => format!("{percent}% recommend"),
            Self::Unrated => String::new(),
        }
    }

    /// Number of reviews that contributed to the aggregate.
    #[must_use]
    pub const fn count(&self) -> usize {
        match self {
            Self::Stars { count, .. } | Self::Recommendation { count, .. } => *count,
            Self::Unrated => 0,
        }
    }
}

/// Computes the aggregate rating for a set of reviews.
///
/// Star sources use the mean of present ratings. Recommendation sources use
/// the share of `recommended` statuses, falling back to stars when no review
/// carries a status (older Facebook reviews were star-rated).
///
/// # Examples
///
/// ```
/// use plaudit_protocol::{AggregateRating, RecommendationStatus, ReviewRecord, Source, aggregate_rating};
///
/// let mut yes = ReviewRecord::default();
/// yes.recommendation_status = Some(RecommendationStatus::Recommended);
/// let mut no = ReviewRecord::default();
/// no.recommendation_status = Some(RecommendationStatus::NotRecommended);
///
/// let reviews = [yes.clone(), yes, no];
/// assert_eq!(
///     aggregate_rating(&reviews, Source::Facebook),
///     AggregateRating::Recommendation { percent: 67, count: 3 },
/// );
/// ```
#[must_use]
pub fn aggregate_rating<'a, I>(reviews: I, source: Source) -> AggregateRating
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let reviews: Vec<&ReviewRecord> = reviews.into_iter().collect();

    if !source.uses_star_rating() {
        let statuses = reviews
            .iter()
            .filter(|review| review.recommendation_status.is_some())
            .count();
        if statuses > 0 {
            let recommended = reviews.iter().filter(|review| review.is_recommended()).count();
            let percent = (recommended as f64 * 100.0 / statuses as f64).round() as u8;
            return AggregateRating::Recommendation {
                percent,
                count: statuses,
            };
        }
    }

    let ratings: Vec<f32> = reviews
        .iter()
        .filter_map(|review| review.clamped_rating())
        .collect();
    if ratings.is_empty() {
        return AggregateRating::Unrated;
    }

    let mean = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64;
    AggregateRating::Stars {
        average: ((mean * 10.0).round() / 10.0) as f32,
        count: ratings.len(),
    }
}

/// How much of a single star is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    /// A fully filled star.
    Full,
    /// A half-filled star.
    Half,
    /// An empty star.
    Empty,
}

impl StarFill {
    /// Returns the glyph used for text renderings of the star.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Full => '★',
            Self::Half => '⯪',
            Self::Empty => '☆',
        }
    }
}

/// Splits a rating into five star fills, rounding to the nearest half star.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::{StarFill, star_fills};
///
/// assert_eq!(
///     star_fills(3.6),
///     [StarFill::Full, StarFill::Full, StarFill::Full, StarFill::Half, StarFill::Empty],
/// );
/// ```
#[must_use]
pub fn star_fills(rating: f32) -> [StarFill; 5] {
    let halves = (rating.clamp(0.0, 5.0) * 2.0).round() as u8;
    std::array::from_fn(|i| {
        let star_halves = halves.saturating_sub(i as u8 * 2);
        match star_halves {
            0 => StarFill::Empty,
            1 => StarFill::Half,
            _ => StarFill::Full,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::RecommendationStatus;

    fn rated(rating: f32) -> ReviewRecord {
        ReviewRecord::new("A", rating, "body")
    }

    #[test]
    fn mean_of_present_ratings_only() {
        let mut unrated = ReviewRecord::default();
        unrated.content = Some("no stars".to_string());
        let reviews = [rated(5.0), rated(4.0), rated(4.0), unrated];
        assert_eq!(
            aggregate_rating(&reviews, Source::Google),
            AggregateRating::Stars {
                average: 4.3,
                count: 3
            }
        );
    }

    #[test]
    fn empty_input_is_unrated() {
        assert_eq!(
            aggregate_rating(&[] as &[ReviewRecord], Source::Google),
            AggregateRating::Unrated
        );
    }

    #[test]
    fn facebook_without_statuses_falls_back_to_stars() {
        let reviews = [rated(5.0), rated(3.0)];
        assert_eq!(
            aggregate_rating(&reviews, Source::Facebook),
            AggregateRating::Stars {
                average: 4.0,
                count: 2
            }
        );
    }

    #[test]
    fn google_ignores_recommendation_statuses() {
        let mut review = rated(2.0);
        review.recommendation_status = Some(RecommendationStatus::Recommended);
        assert!(matches!(
            aggregate_rating(&[review], Source::Google),
            AggregateRating::Stars { .. }
        ));
    }

    #[test]
    fn all_recommended_is_one_hundred_percent() {
        let mut review = ReviewRecord::default();
        review.recommendation_status = Some(RecommendationStatus::Recommended);
        let reviews = vec![review; 4];
        assert_eq!(
            aggregate_rating(&reviews, Source::Facebook),
            AggregateRating::Recommendation {
                percent: 100,
                count: 4
            }
        );
    }

    #[test]
    fn star_fills_boundaries() {
        assert_eq!(star_fills(0.0), [StarFill::Empty; 5]);
        assert_eq!(star_fills(5.0), [StarFill::Full; 5]);
        assert_eq!(star_fills(9.0), [StarFill::Full; 5]);
        assert_eq!(
            star_fills(4.74),
            [
                StarFill::Full,
                StarFill::Full,
                StarFill::Full,
                StarFill::Full,
                StarFill::Half
            ]
        );
    }

    #[test]
    fn headline_for_unrated_is_empty() {
        assert_eq!(AggregateRating::Unrated.headline(), "");
        assert_eq!(AggregateRating::Unrated.count(), 0);
    }
}
