//! Operator console and shutdown supervisor for a long-running node.
//!
//! An [`InputListener`] reads operator commands on its own thread, validates
//! them against the command catalogue, and invokes the [`Backend`] for those
//! that pass. Each processed line becomes one [`CommandEvent`] on a bounded
//! channel.
//!
//! The [`Supervisor`] waits on three sources at once: command events,
//! unsolicited failures of the [`BackgroundService`] (the Prometheus
//! [`MetricsServer`] in production), and host termination signals. The first
//! shutdown condition wins. The service is then given a bounded window to
//! stop and the process exits.

mod backend;
pub mod console;
mod health;
mod process;
mod service;
mod telemetry;

pub use backend::{Backend, TracingBackend};
pub use console::{CommandError, CommandEvent, InputListener};
pub use health::{LifecycleReporter, StructuredLifecycleReporter};
pub use process::{
    HostSignal, LaunchError, SHUTDOWN_BANNER, ShutdownError, ShutdownReport, ShutdownTrigger,
    Supervisor, SupervisorChannels, SupervisorState, TERMINATED_LINE, run_node,
    spawn_signal_forwarder,
};
pub use service::{BackgroundService, MetricsServer, ServiceError, ServiceShutdownError};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
