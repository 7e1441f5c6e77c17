//! Global `tracing` subscriber for the node console.
//!
//! Diagnostics go to stderr so stdout carries only the prompt, usage text,
//! and event echoes. When stderr is the operator's terminal the compact
//! layout is trimmed to stay readable between prompts.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, time::UtcTime};

use nodectl_config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// How log lines are decorated for the current stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SinkProfile {
    ansi: bool,
    timestamps: bool,
}

impl SinkProfile {
    const fn new(format: LogFormat, interactive: bool) -> Self {
        Self {
            ansi: interactive && format.allows_ansi(),
            timestamps: !interactive || format.timestamps_when_interactive(),
        }
    }
}

/// Installs the global subscriber on first use. Later calls are no-ops.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for a malformed filter and
/// [`TelemetryError::Subscriber`] when another subscriber is already global.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config, io::stderr().is_terminal()))
        .map(|()| TelemetryHandle)
}

fn install_subscriber(config: &Config, interactive: bool) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let profile = SinkProfile::new(config.log_format(), interactive);

    let stderr_builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_names(true)
            .with_writer(io::stderr)
            .with_ansi(profile.ansi)
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> =
        match (config.log_format(), profile.timestamps) {
            (LogFormat::Json, _) => Box::new(
                stderr_builder(filter)
                    .with_timer(UtcTime::rfc_3339())
                    .json()
                    .flatten_event(true)
                    .finish(),
            ),
            (LogFormat::Compact, true) => Box::new(
                stderr_builder(filter)
                    .with_timer(UtcTime::rfc_3339())
                    .compact()
                    .finish(),
            ),
            (LogFormat::Compact, false) => {
                Box::new(stderr_builder(filter).without_time().compact().finish())
            }
        };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn rejects_malformed_filters() {
        let config = Config {
            log_filter: "nodectl=loud".to_owned(),
            ..Config::default()
        };
        let error = install_subscriber(&config, false).expect_err("filter should be rejected");
        assert!(matches!(error, TelemetryError::Filter(_)));
    }

    #[rstest]
    #[case::compact_terminal(LogFormat::Compact, true, SinkProfile { ansi: true, timestamps: false })]
    #[case::compact_redirected(LogFormat::Compact, false, SinkProfile { ansi: false, timestamps: true })]
    #[case::json_terminal(LogFormat::Json, true, SinkProfile { ansi: false, timestamps: true })]
    #[case::json_redirected(LogFormat::Json, false, SinkProfile { ansi: false, timestamps: true })]
    fn profile_follows_format_and_terminal(
        #[case] format: LogFormat,
        #[case] interactive: bool,
        #[case] expected: SinkProfile,
    ) {
        assert_eq!(SinkProfile::new(format, interactive), expected);
    }
}
