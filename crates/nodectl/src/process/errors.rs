//! Defines the unified error surface for process launch.

use std::io;
use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

use super::shutdown::ShutdownError;

/// Errors surfaced while launching the node console.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Config {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry could not be initialised.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// Host signal handlers could not be installed.
    #[error("failed to watch termination signals: {source}")]
    Signals {
        /// Underlying signal error.
        #[source]
        source: ShutdownError,
    },
    /// The async runtime could not be built.
    #[error("failed to start async runtime: {source}")]
    Runtime {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The console listener thread could not be spawned.
    #[error("failed to start console listener: {source}")]
    Listener {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl From<Arc<OrthoError>> for LaunchError {
    fn from(source: Arc<OrthoError>) -> Self {
        Self::Config { source }
    }
}

impl From<TelemetryError> for LaunchError {
    fn from(source: TelemetryError) -> Self {
        Self::Telemetry { source }
    }
}

impl From<ShutdownError> for LaunchError {
    fn from(source: ShutdownError) -> Self {
        Self::Signals { source }
    }
}
