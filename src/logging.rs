//! Logging subscriber initialisation.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LogFormat};

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber. Logs go to stderr so command output stays clean.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_subscriber(config: &Config) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(build_env_filter(config));

    match config.log_format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

fn build_env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}
