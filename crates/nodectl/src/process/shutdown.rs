//! Host termination signals and their forwarding to the supervisor.

use std::fmt;
use std::io;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::PROCESS_TARGET;

/// Host termination signals that request a graceful shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// `SIGINT` or Ctrl-C.
    Interrupt,
    /// `SIGTERM`.
    Terminate,
    /// `SIGQUIT`.
    Quit,
}

impl fmt::Display for HostSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
            Self::Quit => "SIGQUIT",
        };
        f.write_str(name)
    }
}

/// Errors reported by shutdown signal listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing signal handlers failed.
    #[error("failed to install signal handlers: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Installs the host signal handlers and forwards each delivery to
/// `signals` until the receiver is dropped.
///
/// Must be called from within a Tokio runtime. Handlers are installed before
/// this returns so no signal is missed once the supervisor starts waiting.
pub fn spawn_signal_forwarder(
    signals: mpsc::Sender<HostSignal>,
) -> Result<JoinHandle<()>, ShutdownError> {
    let mut listener = SignalListener::install()?;
    Ok(tokio::spawn(async move {
        loop {
            let Some(signal) = listener.next().await else {
                debug!(target: PROCESS_TARGET, "signal stream ended");
                return;
            };
            info!(target: PROCESS_TARGET, %signal, "termination signal received");
            if signals.send(signal).await.is_err() {
                debug!(target: PROCESS_TARGET, "supervisor gone; stopping signal forwarder");
                return;
            }
        }
    }))
}

#[cfg(unix)]
struct SignalListener {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalListener {
    fn install() -> Result<Self, ShutdownError> {
        use tokio::signal::unix::{SignalKind, signal};

        let install = |kind: SignalKind| signal(kind).map_err(|source| ShutdownError::Install { source });
        Ok(Self {
            interrupt: install(SignalKind::interrupt())?,
            terminate: install(SignalKind::terminate())?,
            quit: install(SignalKind::quit())?,
        })
    }

    async fn next(&mut self) -> Option<HostSignal> {
        tokio::select! {
            received = self.interrupt.recv() => received.map(|()| HostSignal::Interrupt),
            received = self.terminate.recv() => received.map(|()| HostSignal::Terminate),
            received = self.quit.recv() => received.map(|()| HostSignal::Quit),
        }
    }
}

#[cfg(not(unix))]
struct SignalListener;

#[cfg(not(unix))]
impl SignalListener {
    fn install() -> Result<Self, ShutdownError> {
        Ok(Self)
    }

    async fn next(&mut self) -> Option<HostSignal> {
        tokio::signal::ctrl_c().await.ok().map(|()| HostSignal::Interrupt)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::interrupt(HostSignal::Interrupt, "SIGINT")]
    #[case::terminate(HostSignal::Terminate, "SIGTERM")]
    #[case::quit(HostSignal::Quit, "SIGQUIT")]
    fn signals_display_their_conventional_names(#[case] signal: HostSignal, #[case] name: &str) {
        assert_eq!(signal.to_string(), name);
    }

    #[tokio::test]
    async fn forwarder_installs_handlers_and_can_be_cancelled() {
        let (sender, receiver) = mpsc::channel(1);
        let handle = spawn_signal_forwarder(sender).expect("install handlers");
        drop(receiver);
        handle.abort();
        let outcome = handle.await;
        assert!(outcome.is_err_and(|error| error.is_cancelled()));
    }
}
