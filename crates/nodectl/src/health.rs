//! Structured reporting for node lifecycle events.

use std::sync::Arc;

use crate::process::ShutdownTrigger;
use crate::service::{ServiceError, ServiceShutdownError};

const LIFECYCLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lifecycle");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait LifecycleReporter: Send + Sync {
    /// Invoked once the background service has been launched.
    fn service_started(&self);

    /// Invoked when the background service reports an unsolicited failure.
    fn service_failed(&self, error: &ServiceError);

    /// Invoked when the first shutdown condition is observed.
    fn shutdown_triggered(&self, trigger: &ShutdownTrigger);

    /// Invoked after the background service stopped cleanly.
    fn shutdown_completed(&self);

    /// Invoked when the graceful stop of the service failed.
    fn shutdown_failed(&self, error: &ServiceShutdownError);
}

impl<T> LifecycleReporter for Arc<T>
where
    T: LifecycleReporter,
{
    fn service_started(&self) {
        (**self).service_started();
    }

    fn service_failed(&self, error: &ServiceError) {
        (**self).service_failed(error);
    }

    fn shutdown_triggered(&self, trigger: &ShutdownTrigger) {
        (**self).shutdown_triggered(trigger);
    }

    fn shutdown_completed(&self) {
        (**self).shutdown_completed();
    }

    fn shutdown_failed(&self, error: &ServiceShutdownError) {
        (**self).shutdown_failed(error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredLifecycleReporter;

impl StructuredLifecycleReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LifecycleReporter for StructuredLifecycleReporter {
    fn service_started(&self) {
        tracing::info!(
            target: LIFECYCLE_TARGET,
            event = "service_started",
            "background service started"
        );
    }

    fn service_failed(&self, error: &ServiceError) {
        tracing::error!(
            target: LIFECYCLE_TARGET,
            event = "service_failed",
            error = %error,
            "background service failed"
        );
    }

    fn shutdown_triggered(&self, trigger: &ShutdownTrigger) {
        tracing::info!(
            target: LIFECYCLE_TARGET,
            event = "shutdown_triggered",
            trigger = trigger.as_label(),
            detail = %trigger,
            "graceful shutdown triggered"
        );
    }

    fn shutdown_completed(&self) {
        tracing::info!(
            target: LIFECYCLE_TARGET,
            event = "shutdown_completed",
            "graceful shutdown completed"
        );
    }

    fn shutdown_failed(&self, error: &ServiceShutdownError) {
        tracing::error!(
            target: LIFECYCLE_TARGET,
            event = "shutdown_failed",
            error = %error,
            "graceful shutdown failed"
        );
    }
}
