//! Global `tracing` subscriber for library instrumentation.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{LogFormat, LogLevel, ObservabilityError};

/// Install a stderr subscriber so `tracing` events from the commerce crate
/// show up next to the structured session log.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing(level: LogLevel, format: LogFormat) -> Result<(), ObservabilityError> {
    let filter = build_env_filter(level);

    match format {
        LogFormat::Human => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()?,
    }

    Ok(())
}

fn build_env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing(LogLevel::Debug, LogFormat::Human);
        let second = init_tracing(LogLevel::Debug, LogFormat::Json);

        // Only one global subscriber can exist per process.
        assert!(matches!(second, Err(ObservabilityError::SubscriberInit(_))));
    }
}
