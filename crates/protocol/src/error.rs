//! Error types for the plaudit-protocol crate.
//!
//! These cover the "data" failures of the runtime: a payload that cannot be
//! decoded, or a layout name nobody knows how to render.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The widget-data payload could not be decoded.
    #[error("malformed widget payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// A layout name did not match any known variant.
    #[error("unknown layout variant: {0:?}")]
    UnknownLayout(String),

    /// A review source name did not match any known platform.
    #[error("unknown review source: {0:?}")]
    UnknownSource(String),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
