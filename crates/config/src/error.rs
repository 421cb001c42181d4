//! Error types for configuration operations.
//!
//! This module defines the error types that can occur while reading embed
//! attributes, validating widget configuration, and loading runtime config
//! files.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The embed did not name a widget.
    #[error("missing widget id: set data-widget-id or pass a widget id to init()")]
    MissingWidgetId,

    /// The configured container does not exist on the host page.
    #[error("container #{0} not found on the host page")]
    ContainerNotFound(String),

    /// An embed attribute or init option had an unusable value.
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidAttribute {
        /// The attribute or option name.
        name: String,
        /// The raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A runtime setting is outside its allowed range.
    #[error("invalid runtime setting: {reason}")]
    InvalidRuntimeSetting {
        /// The reason the setting is invalid.
        reason: String,
    },

    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to parse or serialize JSON configuration.
    #[error("failed to process JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            ConfigError::ContainerNotFound("reviews".to_string()).to_string(),
            "container #reviews not found on the host page"
        );

        let err = ConfigError::InvalidAttribute {
            name: "data-autoplay-delay".to_string(),
            value: "soon".to_string(),
            reason: "expected milliseconds".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"soon\" for data-autoplay-delay: expected milliseconds"
        );
    }
}
