//! The single coordination point deciding when the process stops.

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::console::CommandEvent;
use crate::health::LifecycleReporter;
use crate::service::{BackgroundService, ServiceError, ServiceShutdownError};

use super::PROCESS_TARGET;
use super::shutdown::HostSignal;

/// Line written when the shutdown sequence starts.
pub const SHUTDOWN_BANNER: &str = "--- graceful shutdown executing ---";

/// Line written once the shutdown sequence has finished.
pub const TERMINATED_LINE: &str = "process terminated";

/// Supervisor lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// Waiting on the event sources.
    Running,
    /// Terminal. No further events are consumed.
    ShuttingDown,
}

/// The condition that moved the supervisor to
/// [`SupervisorState::ShuttingDown`].
#[derive(Debug)]
pub enum ShutdownTrigger {
    /// A quit or exit command was observed.
    OperatorQuit {
        /// The command as typed.
        command: String,
    },
    /// The background service failed on its own.
    ServiceFailure(ServiceError),
    /// The process received a termination signal.
    HostSignal(HostSignal),
    /// The listener stopped and closed the event channel.
    InputClosed,
}

impl ShutdownTrigger {
    /// Stable label for logs.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::OperatorQuit { .. } => "operator_quit",
            Self::ServiceFailure(_) => "service_failure",
            Self::HostSignal(_) => "host_signal",
            Self::InputClosed => "input_closed",
        }
    }
}

impl fmt::Display for ShutdownTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperatorQuit { command } => write!(f, "operator entered {command}"),
            Self::ServiceFailure(error) => write!(f, "background service failed: {error}"),
            Self::HostSignal(signal) => write!(f, "received {signal}"),
            Self::InputClosed => f.write_str("console input closed"),
        }
    }
}

/// Receiving ends of the three event sources.
pub struct SupervisorChannels {
    /// Command outcomes published by the input listener.
    pub events: mpsc::Receiver<CommandEvent>,
    /// Unsolicited background service failures.
    pub service_errors: mpsc::Receiver<ServiceError>,
    /// Host termination signals.
    pub signals: mpsc::Receiver<HostSignal>,
}

/// Result of a completed supervisor run.
#[derive(Debug)]
pub struct ShutdownReport {
    /// The first shutdown condition observed.
    pub trigger: ShutdownTrigger,
    /// Command events echoed before the trigger, including a quit event.
    pub events_observed: usize,
    /// Outcome of the background service's graceful stop.
    pub shutdown: Result<(), ServiceShutdownError>,
}

impl ShutdownReport {
    /// `true` when the process should exit with a failure status.
    ///
    /// Only a background service failure counts. Shutdown errors are logged
    /// but do not change the exit status.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.trigger, ShutdownTrigger::ServiceFailure(_))
    }
}

/// Multiplexes the event sources into one shutdown decision.
pub struct Supervisor<V, W> {
    service: V,
    channels: SupervisorChannels,
    console: W,
    reporter: Arc<dyn LifecycleReporter>,
    shutdown_timeout: Duration,
    state: SupervisorState,
    errors_open: bool,
    signals_open: bool,
    events_observed: usize,
}

enum Wake {
    Event(Option<CommandEvent>),
    ServiceError(Option<ServiceError>),
    Signal(Option<HostSignal>),
}

impl<V, W> Supervisor<V, W>
where
    V: BackgroundService,
    W: Write,
{
    /// Builds a supervisor in the [`SupervisorState::Running`] state.
    ///
    /// `service` must already be started with the sender matching
    /// `channels.service_errors`.
    pub const fn new(
        service: V,
        channels: SupervisorChannels,
        console: W,
        reporter: Arc<dyn LifecycleReporter>,
        shutdown_timeout: Duration,
    ) -> Self {
        Self {
            service,
            channels,
            console,
            reporter,
            shutdown_timeout,
            state: SupervisorState::Running,
            errors_open: true,
            signals_open: true,
            events_observed: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SupervisorState {
        self.state
    }

    /// Waits for the first shutdown condition, then stops the service once.
    ///
    /// Events still queued when the trigger fires are not drained.
    pub async fn run(mut self) -> ShutdownReport {
        info!(target: PROCESS_TARGET, "supervisor running");
        let trigger = loop {
            if let Some(trigger) = self.next_trigger().await {
                break trigger;
            }
        };
        self.state = SupervisorState::ShuttingDown;
        self.reporter.shutdown_triggered(&trigger);
        self.echo(SHUTDOWN_BANNER);

        let shutdown = self.service.shutdown(self.shutdown_timeout).await;
        match &shutdown {
            Ok(()) => self.reporter.shutdown_completed(),
            Err(error) => self.reporter.shutdown_failed(error),
        }
        self.echo(TERMINATED_LINE);
        info!(
            target: PROCESS_TARGET,
            trigger = trigger.as_label(),
            events = self.events_observed,
            clean = shutdown.is_ok(),
            "supervisor stopped"
        );
        ShutdownReport {
            trigger,
            events_observed: self.events_observed,
            shutdown,
        }
    }

    /// Services exactly one ready source.
    async fn next_trigger(&mut self) -> Option<ShutdownTrigger> {
        let SupervisorChannels {
            events,
            service_errors,
            signals,
        } = &mut self.channels;
        let wake = tokio::select! {
            event = events.recv() => Wake::Event(event),
            error = service_errors.recv(), if self.errors_open => Wake::ServiceError(error),
            signal = signals.recv(), if self.signals_open => Wake::Signal(signal),
        };

        match wake {
            Wake::Event(Some(event)) => self.observe(event),
            Wake::Event(None) => Some(ShutdownTrigger::InputClosed),
            Wake::ServiceError(Some(error)) => {
                self.reporter.service_failed(&error);
                Some(ShutdownTrigger::ServiceFailure(error))
            }
            Wake::ServiceError(None) => {
                debug!(target: PROCESS_TARGET, "service error channel closed");
                self.errors_open = false;
                None
            }
            Wake::Signal(Some(signal)) => Some(ShutdownTrigger::HostSignal(signal)),
            Wake::Signal(None) => {
                debug!(target: PROCESS_TARGET, "signal channel closed");
                self.signals_open = false;
                None
            }
        }
    }

    fn observe(&mut self, event: CommandEvent) -> Option<ShutdownTrigger> {
        self.events_observed += 1;
        self.echo(&format!("received event: {event}"));
        event.is_quit().then(|| ShutdownTrigger::OperatorQuit {
            command: event.command,
        })
    }

    fn echo(&mut self, line: &str) {
        let written = writeln!(self.console, "{line}").and_then(|()| self.console.flush());
        if let Err(error) = written {
            warn!(target: PROCESS_TARGET, %error, "failed to write to console");
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
