//! Process supervision: host signals, the shutdown decision, and launch
//! wiring.

mod errors;
mod launch;
mod shutdown;
mod supervisor;

pub use errors::LaunchError;
pub use launch::run_node;
pub use shutdown::{HostSignal, ShutdownError, spawn_signal_forwarder};
pub use supervisor::{
    SHUTDOWN_BANNER, ShutdownReport, ShutdownTrigger, Supervisor, SupervisorChannels,
    SupervisorState, TERMINATED_LINE,
};

pub(crate) const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Capacity of the command event channel. One slot keeps the listener at
/// most one line ahead of the supervisor.
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 1;
