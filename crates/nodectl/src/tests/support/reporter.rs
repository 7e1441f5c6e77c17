//! Test double for [`LifecycleReporter`] that records events for assertions.

use std::sync::Mutex;

use crate::health::LifecycleReporter;
use crate::process::ShutdownTrigger;
use crate::service::{ServiceError, ServiceShutdownError};

/// Lifecycle events tracked during tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The background service was started.
    ServiceStarted,
    /// The background service failed with a message.
    ServiceFailed(String),
    /// Shutdown was triggered, carrying the trigger label.
    ShutdownTriggered(&'static str),
    /// The service stopped cleanly.
    ShutdownCompleted,
    /// The service failed to stop cleanly.
    ShutdownFailed(String),
}

/// Records lifecycle events.
#[derive(Debug, Default)]
pub struct RecordingLifecycleReporter {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingLifecycleReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events
            .lock()
            .expect("lifecycle reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: LifecycleEvent) {
        self.events
            .lock()
            .expect("lifecycle reporter mutex poisoned")
            .push(event);
    }
}

impl LifecycleReporter for RecordingLifecycleReporter {
    fn service_started(&self) {
        self.record(LifecycleEvent::ServiceStarted);
    }

    fn service_failed(&self, error: &ServiceError) {
        self.record(LifecycleEvent::ServiceFailed(error.to_string()));
    }

    fn shutdown_triggered(&self, trigger: &ShutdownTrigger) {
        self.record(LifecycleEvent::ShutdownTriggered(trigger.as_label()));
    }

    fn shutdown_completed(&self) {
        self.record(LifecycleEvent::ShutdownCompleted);
    }

    fn shutdown_failed(&self, error: &ServiceShutdownError) {
        self.record(LifecycleEvent::ShutdownFailed(error.to_string()));
    }
}
