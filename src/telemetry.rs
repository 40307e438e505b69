//! Log subscriber installation.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*};

/// Failures while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive is malformed.
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        /// Directive as supplied.
        directive: String,
        /// Parser error.
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Builds an [`EnvFilter`] from a directive such as `info` or
/// `taskflow=debug,tower_http=info`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the directive is malformed.
pub fn filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::InvalidFilter {
        directive: directive.to_owned(),
        source,
    })
}

/// Installs a global fmt subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the directive is malformed or a global
/// subscriber is already set.
pub fn init(directive: &str) -> Result<(), TelemetryError> {
    let env_filter = filter(directive)?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()?;
    Ok(())
}
