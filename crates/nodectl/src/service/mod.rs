//! Long-running background service supervised alongside the console.

mod errors;
mod metrics_server;
mod recorder;

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

pub use errors::{ServiceError, ServiceShutdownError};
pub use metrics_server::MetricsServer;

pub(crate) const SERVICE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::service");

/// A service started in the background and stopped on process shutdown.
#[async_trait]
pub trait BackgroundService: Send {
    /// Launches the service and returns immediately.
    ///
    /// Unsolicited fatal errors, including startup failures, are sent once on
    /// `errors`. A stop requested through [`Self::shutdown`] is never
    /// reported there.
    fn start(&mut self, errors: mpsc::Sender<ServiceError>);

    /// Requests an orderly stop and waits at most `timeout` for it.
    ///
    /// Calling this on a service that was never started, or a second time,
    /// returns `Ok(())`.
    async fn shutdown(&mut self, timeout: Duration) -> Result<(), ServiceShutdownError>;
}
