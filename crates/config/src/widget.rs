//! Per-embed widget configuration.
//!
//! A [`WidgetConfig`] is built once per embed, either from the attributes of
//! the `<script data-widget-id>` tag ([`WidgetConfig::from_attributes`]) or
//! from the argument of a programmatic `init()` call ([`InitArg`]). It is not
//! modified after initialization.
//!
//! # Examples
//!
//! ```
//! use plaudit_config::{InitArg, WidgetConfig};
//! use plaudit_protocol::Layout;
//!
//! // Bare widget id
//! let arg: InitArg = serde_json::from_str(r#""w_123""#).unwrap();
//! assert_eq!(arg.into_config().widget_id, "w_123");
//!
//! // Full config object
//! let arg: InitArg =
//!     serde_json::from_str(r#"{"widgetId": "w_123", "layout": "grid"}"#).unwrap();
//! let config = arg.into_config();
//! assert_eq!(config.layout, Layout::Grid);
//! assert!(config.autoplay);
//! ```

use std::str::FromStr;

use plaudit_protocol::Layout;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::breakpoints::{Breakpoint, CardsPerBreakpoint};
use crate::error::{ConfigError, Result};

/// Default autoplay delay in milliseconds.
pub const DEFAULT_AUTOPLAY_DELAY_MS: u64 = 5000;

/// Minimum accepted autoplay delay in milliseconds.
pub const MIN_AUTOPLAY_DELAY_MS: u64 = 1000;

/// Maximum accepted autoplay delay in milliseconds.
pub const MAX_AUTOPLAY_DELAY_MS: u64 = 60_000;

/// Configuration of one embedded widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// The widget to display. Required.
    pub widget_id: String,

    /// Id of the host element to render into. When absent, a container is
    /// synthesized right after the script tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,

    /// Accent color as a CSS color value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,

    /// The layout variant to render.
    pub layout: Layout,

    /// Per-breakpoint visible card overrides.
    pub cards: CardsPerBreakpoint,

    /// Whether the carousel advances on its own.
    pub autoplay: bool,

    /// Delay between autoplay ticks.
    #[serde(rename = "autoplayDelay")]
    pub autoplay_delay_ms: u64,

    /// Whether `next` wraps from the last page back to the first.
    #[serde(rename = "loop")]
    pub loop_slides: bool,

    /// Show star ratings or recommendation badges on cards.
    pub show_ratings: bool,

    /// Show the review date on cards.
    pub show_dates: bool,

    /// Show reviewer avatars on cards.
    pub show_avatars: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            widget_id: String::new(),
            container_id: None,
            theme_color: None,
            layout: Layout::default(),
            cards: CardsPerBreakpoint::default(),
            autoplay: true,
            autoplay_delay_ms: DEFAULT_AUTOPLAY_DELAY_MS,
            loop_slides: true,
            show_ratings: true,
            show_dates: true,
            show_avatars: true,
        }
    }
}

impl WidgetConfig {
    /// Creates a configuration for a widget id with every option defaulted.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_config::WidgetConfig;
    ///
    /// let config = WidgetConfig::new("w_1");
    /// assert_eq!(config.widget_id, "w_1");
    /// assert!(config.container_id.is_none());
    /// assert!(config.loop_slides);
    /// ```
    #[must_use]
    pub fn new(widget_id: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
            ..Self::default()
        }
    }

    /// Builds a configuration from script tag attributes.
    ///
    /// Attribute names are the `data-*` names as written on the tag. Unknown
    /// attributes are ignored. An attribute with an unusable value is logged
    /// and the default is kept, so a typo never prevents the widget from
    /// rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingWidgetId`] if `data-widget-id` is absent
    /// or blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_config::{Breakpoint, WidgetConfig};
    /// use plaudit_protocol::Layout;
    ///
    /// let config = WidgetConfig::from_attributes([
    ///     ("data-widget-id", "w_42"),
    ///     ("data-layout", "masonry"),
    ///     ("data-cards-desktop", "3"),
    ///     ("data-autoplay", "false"),
    ///     ("data-autoplay-delay", "not a number"),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(config.layout, Layout::Masonry);
    /// assert_eq!(config.cards.cards_for(Breakpoint::Desktop), 3);
    /// assert!(!config.autoplay);
    /// assert_eq!(config.autoplay_delay_ms, 5000);
    ///
    /// assert!(WidgetConfig::from_attributes([("data-layout", "grid")]).is_err());
    /// ```
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();

        for (name, value) in attributes {
            if let Err(err) = config.apply_attribute(name, value) {
                warn!(%err, "ignoring embed attribute");
            }
        }

        if config.widget_id.is_empty() {
            return Err(ConfigError::MissingWidgetId);
        }
        Ok(config)
    }

    /// Applies one `data-*` attribute.
    fn apply_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match name {
            "data-widget-id" => self.widget_id = value.to_string(),
            "data-container-id" => self.container_id = non_empty(value),
            "data-theme-color" => self.theme_color = non_empty(value),
            "data-layout" => {
                self.layout = Layout::from_str(value)
                    .map_err(|err| invalid(name, value, err.to_string()))?;
            }
            "data-autoplay" => self.autoplay = parse_flag(name, value)?,
            "data-autoplay-delay" => {
                let delay = value
                    .parse::<u64>()
                    .map_err(|_| invalid(name, value, "expected milliseconds"))?;
                check_autoplay_delay(delay).map_err(|reason| invalid(name, value, reason))?;
                self.autoplay_delay_ms = delay;
            }
            "data-loop" => self.loop_slides = parse_flag(name, value)?,
            "data-show-ratings" => self.show_ratings = parse_flag(name, value)?,
            "data-show-dates" => self.show_dates = parse_flag(name, value)?,
            "data-show-avatars" => self.show_avatars = parse_flag(name, value)?,
            other => {
                if let Some(suffix) = other.strip_prefix("data-cards-") {
                    let breakpoint = Breakpoint::ALL
                        .into_iter()
                        .find(|b| b.as_str() == suffix)
                        .ok_or_else(|| invalid(name, value, "unknown breakpoint"))?;
                    let cards = value
                        .parse::<u8>()
                        .ok()
                        .filter(|c| (1..=crate::breakpoints::MAX_CARDS).contains(c))
                        .ok_or_else(|| invalid(name, value, "expected a card count"))?;
                    self.cards.set(breakpoint, cards);
                }
            }
        }
        Ok(())
    }

    /// Validates a configuration that did not come from attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingWidgetId`] for a blank widget id and
    /// [`ConfigError::InvalidAttribute`] for out-of-range options.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_config::WidgetConfig;
    ///
    /// assert!(WidgetConfig::new("w_1").validate().is_ok());
    /// assert!(WidgetConfig::new("  ").validate().is_err());
    ///
    /// let mut config = WidgetConfig::new("w_1");
    /// config.autoplay_delay_ms = 10;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.widget_id.trim().is_empty() {
            return Err(ConfigError::MissingWidgetId);
        }
        check_autoplay_delay(self.autoplay_delay_ms).map_err(|reason| {
            invalid("autoplayDelay", &self.autoplay_delay_ms.to_string(), reason)
        })?;
        self.cards.validate()
    }

    /// Returns the number of cards to show side by side at a viewport width.
    #[must_use]
    pub fn cards_for_width(&self, viewport_width: f32) -> u8 {
        self.cards.cards_for(Breakpoint::for_width(viewport_width))
    }
}

fn check_autoplay_delay(delay: u64) -> std::result::Result<(), String> {
    if delay < MIN_AUTOPLAY_DELAY_MS {
        return Err(format!(
            "delay {delay} is below minimum of {MIN_AUTOPLAY_DELAY_MS} ms"
        ));
    }
    if delay > MAX_AUTOPLAY_DELAY_MS {
        return Err(format!(
            "delay {delay} exceeds maximum of {MAX_AUTOPLAY_DELAY_MS} ms"
        ));
    }
    Ok(())
}

/// Parses a boolean attribute. A bare attribute (empty value) means `true`.
fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(name, value, "expected true or false")),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn invalid(name: &str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidAttribute {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The argument of a programmatic `init()` call.
///
/// Accepts either a bare widget id string or a configuration object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitArg {
    /// `init("w_123")`
    WidgetId(String),
    /// `init({ widgetId: "w_123", ... })`
    Config(Box<WidgetConfig>),
}

impl InitArg {
    /// Converts the argument into a full configuration.
    #[must_use]
    pub fn into_config(self) -> WidgetConfig {
        match self {
            Self::WidgetId(id) => WidgetConfig::new(id),
            Self::Config(config) => *config,
        }
    }
}

impl From<&str> for InitArg {
    fn from(widget_id: &str) -> Self {
        Self::WidgetId(widget_id.to_string())
    }
}

impl From<WidgetConfig> for InitArg {
    fn from(config: WidgetConfig) -> Self {
        Self::Config(Box::new(config))
    }
}

impl<'de> Deserialize<'de> for InitArg {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::value::MapAccessDeserializer;
        use serde::de::{self, MapAccess, Visitor};

        struct InitArgVisitor;

        impl<'de> Visitor<'de> for InitArgVisitor {
            type Value = InitArg;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a widget id string or a widget configuration object")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                let id = v.trim();
                if id.is_empty() {
                    return Err(de::Error::custom(ConfigError::MissingWidgetId));
                }
                Ok(InitArg::WidgetId(id.to_string()))
            }

            fn visit_map<M>(self, map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let config = WidgetConfig::deserialize(MapAccessDeserializer::new(map))?;
                Ok(InitArg::Config(Box::new(config)))
            }
        }

        deserializer.deserialize_any(InitArgVisitor)
    }
}
