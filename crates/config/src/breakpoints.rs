//! Viewport breakpoints and per-breakpoint card counts.
//!
//! The carousel and grid layouts pick how many cards to show side by side
//! from the viewport width. Each breakpoint has a default that an embed can
//! override with a `data-cards-<breakpoint>` attribute.
//!
//! | Breakpoint | Viewport width | Default cards |
//! |------------|----------------|---------------|
//! | `mobile`   | `< 640`        | 1 |
//! | `foldable` | `640..768`     | 2 |
//! | `tablet`   | `768..1024`    | 2 |
//! | `laptop`   | `1024..1280`   | 3 |
//! | `desktop`  | `1280..1536`   | 4 |
//! | `wide`     | `>= 1536`      | 5 |

use serde::{Deserialize, Serialize};

/// Largest card count accepted from configuration.
pub const MAX_CARDS: u8 = 10;

/// A named viewport width range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Phones in portrait orientation.
    Mobile,
    /// Foldables and large phones in landscape.
    Foldable,
    /// Tablets.
    Tablet,
    /// Small laptops.
    Laptop,
    /// Desktop monitors.
    Desktop,
    /// Wide-screen monitors.
    Wide,
}

impl Breakpoint {
    /// All breakpoints from narrowest to widest.
    pub const ALL: [Breakpoint; 6] = [
        Self::Mobile,
        Self::Foldable,
        Self::Tablet,
        Self::Laptop,
        Self::Desktop,
        Self::Wide,
    ];

    /// Returns the breakpoint containing `viewport_width` (CSS pixels).
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_config::Breakpoint;
    ///
    /// assert_eq!(Breakpoint::for_width(375.0), Breakpoint::Mobile);
    /// assert_eq!(Breakpoint::for_width(768.0), Breakpoint::Tablet);
    /// assert_eq!(Breakpoint::for_width(1920.0), Breakpoint::Wide);
    /// ```
    #[must_use]
    pub fn for_width(viewport_width: f32) -> Self {
        match viewport_width {
            w if w < 640.0 => Self::Mobile,
            w if w < 768.0 => Self::Foldable,
            w if w < 1024.0 => Self::Tablet,
            w if w < 1280.0 => Self::Laptop,
            w if w < 1536.0 => Self::Desktop,
            _ => Self::Wide,
        }
    }

    /// Returns the built-in number of visible cards for this breakpoint.
    #[must_use]
    pub const fn default_cards(self) -> u8 {
        match self {
            Self::Mobile => 1,
            Self::Foldable | Self::Tablet => 2,
            Self::Laptop => 3,
            Self::Desktop => 4,
            Self::Wide => 5,
        }
    }

    /// Returns the lowercase name used in `data-cards-<name>` attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Foldable => "foldable",
            Self::Tablet => "tablet",
            Self::Laptop => "laptop",
            Self::Desktop => "desktop",
            Self::Wide => "wide",
        }
    }
}

/// Per-breakpoint card count overrides.
///
/// `None` means "use the breakpoint default".
///
/// # Examples
///
/// ```
/// use plaudit_config::{Breakpoint, CardsPerBreakpoint};
///
/// let mut cards = CardsPerBreakpoint::default();
/// cards.set(Breakpoint::Desktop, 3);
///
/// assert_eq!(cards.cards_for(Breakpoint::Desktop), 3);
/// assert_eq!(cards.cards_for(Breakpoint::Wide), 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardsPerBreakpoint {
    /// Override for [`Breakpoint::Mobile`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<u8>,
    /// Override for [`Breakpoint::Foldable`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foldable: Option<u8>,
    /// Override for [`Breakpoint::Tablet`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet: Option<u8>,
    /// Override for [`Breakpoint::Laptop`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laptop: Option<u8>,
    /// Override for [`Breakpoint::Desktop`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<u8>,
    /// Override for [`Breakpoint::Wide`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wide: Option<u8>,
}

impl CardsPerBreakpoint {
    /// Returns the override for a breakpoint, if any.
    #[must_use]
    pub const fn get(&self, breakpoint: Breakpoint) -> Option<u8> {
        match breakpoint {
            Breakpoint::Mobile => self.mobile,
            Breakpoint::Foldable => self.foldable,
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Laptop => self.laptop,
            Breakpoint::Desktop => self.desktop,
            Breakpoint::Wide => self.wide,
        }
    }

    /// Sets the override for a breakpoint.
    pub fn set(&mut self, breakpoint: Breakpoint, cards: u8) {
        let slot = match breakpoint {
            Breakpoint::Mobile => &mut self.mobile,
            Breakpoint::Foldable => &mut self.foldable,
            Breakpoint::Tablet => &mut self.tablet,
            Breakpoint::Laptop => &mut self.laptop,
            Breakpoint::Desktop => &mut self.desktop,
            Breakpoint::Wide => &mut self.wide,
        };
        *slot = Some(cards);
    }

    /// Returns the configured card count for a breakpoint, falling back to
    /// the breakpoint default. Zero overrides are ignored.
    #[must_use]
    pub fn cards_for(&self, breakpoint: Breakpoint) -> u8 {
        self.get(breakpoint)
            .filter(|cards| *cards > 0)
            .unwrap_or_else(|| breakpoint.default_cards())
    }

    /// Validates that every override is within `1..=MAX_CARDS`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAttribute`](crate::ConfigError::InvalidAttribute)
    /// naming the first offending `data-cards-*` attribute.
    pub fn validate(&self) -> crate::Result<()> {
        for breakpoint in Breakpoint::ALL {
            if let Some(cards) = self.get(breakpoint)
                && !(1..=MAX_CARDS).contains(&cards)
            {
                return Err(crate::ConfigError::InvalidAttribute {
                    name: format!("data-cards-{}", breakpoint.as_str()),
                    value: cards.to_string(),
                    reason: format!("expected 1 to {MAX_CARDS} cards"),
                });
            }
        }
        Ok(())
    }
}
