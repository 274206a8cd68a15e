//! Error types for logging configuration.

use thiserror::Error;

/// Errors raised while configuring logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ObservabilityError {
    /// Level name not one of trace, debug, info, warn, error.
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    /// Format name not one of json, human.
    #[error("Unknown log format: {0}")]
    UnknownFormat(String),

    /// A global tracing subscriber could not be installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

impl From<tracing_subscriber::util::TryInitError> for ObservabilityError {
    fn from(err: tracing_subscriber::util::TryInitError) -> Self {
        Self::SubscriberInit(err.to_string())
    }
}
