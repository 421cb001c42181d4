//! Runtime settings shared by every widget on a page.
//!
//! This module provides [`RuntimeConfig`]: where to fetch review data from,
//! where variant modules are served from, and the retry and timeout knobs of
//! the fetcher and the loader.
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`PLAUDIT_API_DOMAIN`)
//! 2. Local config (`./plaudit.json5` or `./plaudit.json`)
//! 3. User config (`~/.config/plaudit/config.json5` or `~/.config/plaudit/config.json`)
//! 4. Built-in defaults

use std::path::Path;
use std::time::Duration;

use plaudit_protocol::Layout;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Default API domain for widget data.
pub const DEFAULT_API_DOMAIN: &str = "https://api.plaudit.app";

/// Environment variable overriding [`RuntimeConfig::api_domain`].
pub const API_DOMAIN_ENV: &str = "PLAUDIT_API_DOMAIN";

/// Minimum request or load timeout (250 ms).
pub const MIN_TIMEOUT_MS: u64 = 250;

/// Maximum request or load timeout (2 minutes).
pub const MAX_TIMEOUT_MS: u64 = 120_000;

/// Maximum retry count for fetches and module loads.
pub const MAX_RETRIES: u32 = 10;

/// Fetcher retry and timeout settings.
///
/// # Examples
///
/// ```
/// use plaudit_config::FetchSettings;
/// use std::time::Duration;
///
/// let settings = FetchSettings::default();
/// assert_eq!(settings.timeout(), Duration::from_secs(10));
/// assert_eq!(settings.retries, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Hard timeout of a single request.
    pub timeout_ms: u64,
    /// Retries after the first attempt.
    pub retries: u32,
    /// Delay before the first retry; doubles on every further retry.
    pub base_delay_ms: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            retries: 3,
            base_delay_ms: 1000,
        }
    }
}

impl FetchSettings {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the base backoff delay.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

/// Variant module loader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Total load attempts per layout before falling back.
    pub retry_attempts: u32,
    /// Time allowed for a script to fire its load or error event.
    pub load_timeout_ms: u64,
    /// Wait after the load event before checking the export.
    pub grace_ms: u64,
    /// Delay before the first retry; doubles on every further retry.
    pub retry_delay_ms: u64,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            retry_attempts: 3,
            load_timeout_ms: 10_000,
            grace_ms: 100,
            retry_delay_ms: 500,
        }
    }
}

impl LoaderSettings {
    /// Returns the script load timeout.
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// Returns the self-registration grace period.
    #[must_use]
    pub const fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    /// Returns the base retry delay.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Page-wide runtime configuration.
///
/// # Examples
///
/// ```
/// use plaudit_config::RuntimeConfig;
/// use plaudit_protocol::Layout;
///
/// let config = RuntimeConfig::default();
/// assert_eq!(config.api_domain, "https://api.plaudit.app");
/// assert_eq!(config.default_layout, Layout::Carousel);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Base URL of the widget-data API, without a trailing slash.
    pub api_domain: String,

    /// Origin that variant modules are served from. When unset, the origin
    /// is discovered from the loader script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_origin: Option<String>,

    /// Fetcher settings.
    pub fetch: FetchSettings,

    /// Loader settings.
    pub loader: LoaderSettings,

    /// Layout used when the requested variant cannot be loaded.
    pub default_layout: Layout,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_domain: DEFAULT_API_DOMAIN.to_string(),
            asset_origin: None,
            fetch: FetchSettings::default(),
            loader: LoaderSettings::default(),
            default_layout: Layout::Carousel,
        }
    }
}

impl RuntimeConfig {
    /// Loads configuration from the default file locations and applies
    /// environment overrides.
    ///
    /// If no configuration file is found, returns the defaults (with
    /// environment overrides).
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read,
    /// parsed or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use plaudit_config::RuntimeConfig;
    ///
    /// # fn example() -> plaudit_config::Result<()> {
    /// let config = RuntimeConfig::load()?;
    /// println!("Fetching from {}", config.api_domain);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => {
                debug!(path = %path.display(), "loading runtime config");
                read_config_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file and applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config: Self = read_config_file(path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_config::RuntimeConfig;
    ///
    /// let mut config = RuntimeConfig::default();
    /// config.apply_overrides(|key| {
    ///     (key == "PLAUDIT_API_DOMAIN").then(|| "http://localhost:3000/".to_string())
    /// });
    /// assert_eq!(config.api_domain, "http://localhost:3000");
    /// ```
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(domain) = lookup(API_DOMAIN_ENV).filter(|d| !d.trim().is_empty()) {
            debug!(%domain, "api domain overridden from environment");
            self.api_domain = domain;
        }
        self.api_domain = self.api_domain.trim().trim_end_matches('/').to_string();
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRuntimeSetting`] if a timeout or retry
    /// count is outside its allowed range or the API domain is not an
    /// `http(s)` URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_config::RuntimeConfig;
    ///
    /// let mut config = RuntimeConfig::default();
    /// config.fetch.timeout_ms = 10;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !(self.api_domain.starts_with("http://") || self.api_domain.starts_with("https://")) {
            return Err(invalid_setting(format!(
                "api_domain {:?} must start with http:// or https://",
                self.api_domain
            )));
        }

        check_timeout("fetch.timeout_ms", self.fetch.timeout_ms)?;
        check_timeout("loader.load_timeout_ms", self.loader.load_timeout_ms)?;

        if self.fetch.retries > MAX_RETRIES {
            return Err(invalid_setting(format!(
                "fetch.retries {} exceeds maximum of {MAX_RETRIES}",
                self.fetch.retries
            )));
        }
        if self.loader.retry_attempts == 0 || self.loader.retry_attempts > MAX_RETRIES {
            return Err(invalid_setting(format!(
                "loader.retry_attempts {} must be between 1 and {MAX_RETRIES}",
                self.loader.retry_attempts
            )));
        }
        if self.loader.grace_ms > self.loader.load_timeout_ms {
            return Err(invalid_setting(format!(
                "loader.grace_ms {} exceeds loader.load_timeout_ms {}",
                self.loader.grace_ms, self.loader.load_timeout_ms
            )));
        }

        Ok(())
    }

    /// Returns the widget-data endpoint for a widget, without query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaudit_config::RuntimeConfig;
    ///
    /// let config = RuntimeConfig::default();
    /// assert_eq!(
    ///     config.widget_data_url("w_1"),
    ///     "https://api.plaudit.app/api/public/widget-data/w_1",
    /// );
    /// ```
    #[must_use]
    pub fn widget_data_url(&self, encoded_widget_id: &str) -> String {
        format!(
            "{}/api/public/widget-data/{encoded_widget_id}",
            self.api_domain
        )
    }
}

fn check_timeout(name: &str, value: u64) -> Result<()> {
    if value < MIN_TIMEOUT_MS {
        return Err(invalid_setting(format!(
            "{name} {value} is below minimum of {MIN_TIMEOUT_MS} ms"
        )));
    }
    if value > MAX_TIMEOUT_MS {
        return Err(invalid_setting(format!(
            "{name} {value} exceeds maximum of {MAX_TIMEOUT_MS} ms"
        )));
    }
    Ok(())
}

fn invalid_setting(reason: String) -> ConfigError {
    ConfigError::InvalidRuntimeSetting { reason }
}
