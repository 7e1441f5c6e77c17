//! Background service double that records its lifecycle calls.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::service::{BackgroundService, ServiceError, ServiceShutdownError};

/// Shares its state across clones so tests can inspect a service the
/// supervisor owns.
#[derive(Debug, Clone, Default)]
pub struct RecordingService {
    state: Arc<Mutex<ServiceState>>,
}

#[derive(Debug, Default)]
struct ServiceState {
    starts: usize,
    shutdowns: Vec<Duration>,
    stalls_on_shutdown: bool,
    errors: Option<mpsc::Sender<ServiceError>>,
}

impl RecordingService {
    /// A service whose every shutdown times out.
    #[must_use]
    pub fn stalling() -> Self {
        let service = Self::default();
        service.lock().stalls_on_shutdown = true;
        service
    }

    /// Number of `start` calls.
    #[must_use]
    pub fn starts(&self) -> usize {
        self.lock().starts
    }

    /// Timeouts passed to each `shutdown` call.
    #[must_use]
    pub fn shutdown_calls(&self) -> Vec<Duration> {
        self.lock().shutdowns.clone()
    }

    /// Reports an unsolicited failure through the channel given to `start`.
    pub fn fail(&self, message: &str) {
        let sender = self.lock().errors.clone().expect("service was not started");
        sender
            .try_send(ServiceError::Recorder {
                message: message.to_owned(),
            })
            .expect("service error channel should accept the failure");
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ServiceState> {
        self.state.lock().expect("service state mutex poisoned")
    }
}

#[async_trait]
impl BackgroundService for RecordingService {
    fn start(&mut self, errors: mpsc::Sender<ServiceError>) {
        let mut state = self.lock();
        state.starts += 1;
        state.errors = Some(errors);
    }

    async fn shutdown(&mut self, timeout: Duration) -> Result<(), ServiceShutdownError> {
        let mut state = self.lock();
        state.shutdowns.push(timeout);
        state.errors = None;
        if state.stalls_on_shutdown {
            Err(ServiceShutdownError::Timeout { timeout })
        } else {
            Ok(())
        }
    }
}
