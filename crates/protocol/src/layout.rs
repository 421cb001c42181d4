//! Layout variants and their display conventions.
//!
//! Each variant ships as its own runtime module and has its own conventions
//! for how much of a review body fits on a card and how many reviews are
//! fetched up front.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Initial and incremental page sizes for a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    /// Number of reviews fetched and displayed on first render.
    pub initial: usize,
    /// Number of reviews fetched by each "Load More".
    pub increment: usize,
}

/// A widget layout variant.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::Layout;
///
/// let layout: Layout = "Masonry".parse().unwrap();
/// assert_eq!(layout, Layout::Masonry);
/// assert_eq!(layout.to_string(), "masonry");
/// assert_eq!(Layout::default(), Layout::Carousel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Horizontally sliding cards with arrows, dots, drag and autoplay.
    #[default]
    Carousel,
    /// A responsive grid of cards.
    Grid,
    /// A vertical list with "Load More" / "Show Less".
    List,
    /// A compact horizontal strip with "Load More".
    Bar,
    /// An aggregate rating badge with a few review snippets.
    Badge,
    /// Cards distributed into columns of uneven height.
    Masonry,
}

impl Layout {
    /// All layout variants, in registry order.
    pub const ALL: [Layout; 6] = [
        Self::Carousel,
        Self::Grid,
        Self::List,
        Self::Bar,
        Self::Badge,
        Self::Masonry,
    ];

    /// Returns the lowercase wire name of the layout.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::Grid => "grid",
            Self::List => "list",
            Self::Bar => "bar",
            Self::Badge => "badge",
            Self::Masonry => "masonry",
        }
    }

    /// Maximum number of body characters shown on a card before the
    /// "Read more" affordance appears.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_protocol::Layout;
    ///
    /// assert_eq!(Layout::Bar.truncate_at(), 120);
    /// assert_eq!(Layout::List.truncate_at(), 300);
    /// ```
    #[must_use]
    pub const fn truncate_at(self) -> usize {
        match self {
            Self::Carousel => 150,
            Self::Grid => 200,
            Self::List => 300,
            Self::Bar | Self::Badge => 120,
            Self::Masonry => 250,
        }
    }

    /// Page sizes used when fetching reviews for this layout.
    #[must_use]
    pub const fn page_size(self) -> PageSize {
        match self {
            Self::List => PageSize {
                initial: 5,
                increment: 5,
            },
            Self::Bar => PageSize {
                initial: 4,
                increment: 4,
            },
            Self::Carousel | Self::Grid | Self::Badge | Self::Masonry => PageSize {
                initial: 20,
                increment: 0,
            },
        }
    }

    /// Returns `true` for layouts with incremental "Load More" pagination.
    #[must_use]
    pub const fn supports_load_more(self) -> bool {
        matches!(self, Self::List | Self::Bar)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|layout| layout.as_str() == wanted)
            .ok_or_else(|| ProtocolError::UnknownLayout(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_variant() {
        for layout in Layout::ALL {
            assert_eq!(layout.as_str().parse::<Layout>().unwrap(), layout);
        }
    }

    #[test]
    fn parse_trims_and_ignores_case() {
        assert_eq!(" GRID ".parse::<Layout>().unwrap(), Layout::Grid);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "slideshow".parse::<Layout>().unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownLayout(name) if name == "slideshow"));
    }

    #[test]
    fn truncation_thresholds_stay_in_range() {
        for layout in Layout::ALL {
            assert!((120..=300).contains(&layout.truncate_at()));
        }
    }

    #[test]
    fn only_list_and_bar_paginate() {
        let paginated: Vec<_> = Layout::ALL
            .into_iter()
            .filter(|layout| layout.supports_load_more())
            .collect();
        assert_eq!(paginated, vec![Layout::List, Layout::Bar]);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Layout::Masonry).unwrap();
        assert_eq!(json, r#""masonry""#);
    }
}
