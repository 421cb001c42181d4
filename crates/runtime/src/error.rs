//! Error types for the widget runtime.

use std::time::Duration;

use plaudit_config::ConfigError;
use plaudit_fetch::FetchError;
use plaudit_protocol::Layout;
use thiserror::Error;

/// A variant module failed to load.
///
/// `Clone` because one load is shared by every caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The script element reported an error.
    #[error("failed to load {url}: {message}")]
    Injection {
        /// Script URL.
        url: String,
        /// Host-reported reason.
        message: String,
    },

    /// Neither load nor error fired in time.
    #[error("loading {url} timed out after {timeout:?}")]
    Timeout {
        /// Script URL.
        url: String,
        /// The load timeout.
        timeout: Duration,
    },

    /// The script loaded but never registered its export.
    #[error("{url} loaded but `{export}` was not registered")]
    MissingExport {
        /// Script URL.
        url: String,
        /// Expected export name.
        export: String,
    },

    /// The layout has no registered module.
    #[error("no module registered for layout {0}")]
    Unregistered(Layout),
}

/// Why a widget failed to initialize after it had a container.
#[derive(Debug, Error)]
pub enum InitError {
    /// The variant module could not be loaded, even with the fallback.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The widget data could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Errors surfaced by a live widget instance.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The instance was destroyed.
    #[error("widget instance was destroyed")]
    Destroyed,
}

/// Result type for runtime operations.
pub type Result<T, E = RuntimeError> = std::result::Result<T, E>;
