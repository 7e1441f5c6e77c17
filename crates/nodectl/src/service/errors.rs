//! Failures reported by background services.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Unsolicited failures of a background service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The listening socket could not be bound.
    #[error("failed to bind metrics endpoint {addr}: {source}")]
    Bind {
        /// Configured bind address.
        addr: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The server stopped with an error while running.
    #[error("metrics endpoint failed: {source}")]
    Serve {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The metrics recorder could not be installed.
    #[error("failed to install metrics recorder: {message}")]
    Recorder {
        /// Description from the exporter.
        message: String,
    },
}

/// Failures of a requested graceful shutdown.
#[derive(Debug, Error)]
pub enum ServiceShutdownError {
    /// In-flight work did not finish inside the window.
    #[error("service did not stop within {timeout:?}")]
    Timeout {
        /// Window that elapsed.
        timeout: Duration,
    },
    /// The service task ended abnormally.
    #[error("service task failed during shutdown: {message}")]
    Join {
        /// Description of the join failure.
        message: String,
    },
}
