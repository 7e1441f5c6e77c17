//! Wires the console, the background service, and the supervisor together.

use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use nodectl_config::{Config, SESSION_ENV_VAR};

use crate::backend::{Backend, TracingBackend};
use crate::console::{
    Dispatcher, EnvSession, FixedSession, InputListener, SessionId, SessionSource,
};
use crate::health::{LifecycleReporter, StructuredLifecycleReporter};
use crate::service::{BackgroundService, MetricsServer};
use crate::telemetry;

use super::errors::LaunchError;
use super::shutdown::{HostSignal, spawn_signal_forwarder};
use super::supervisor::{ShutdownReport, Supervisor, SupervisorChannels};
use super::{EVENT_CHANNEL_CAPACITY, PROCESS_TARGET};

/// Console streams: the operator input and the three stdout sinks.
pub(crate) struct ConsoleIo<R, W> {
    pub(crate) input: R,
    pub(crate) prompt: W,
    pub(crate) usage: W,
    pub(crate) echo: W,
}

/// Collaborators required to run the console until shutdown.
pub(crate) struct ConsolePlan<R, W, B, S, V> {
    pub(crate) io: ConsoleIo<R, W>,
    pub(crate) backend: B,
    pub(crate) session: S,
    pub(crate) service: V,
    pub(crate) signals: mpsc::Receiver<HostSignal>,
    pub(crate) reporter: Arc<dyn LifecycleReporter>,
    pub(crate) shutdown_timeout: Duration,
}

/// Runs the node console using the production collaborators.
///
/// # Errors
///
/// Returns a [`LaunchError`] when configuration, telemetry, the runtime, the
/// signal handlers, or the listener thread cannot be set up. Failures after
/// start-up are carried in the returned [`ShutdownReport`].
pub fn run_node() -> Result<ShutdownReport, LaunchError> {
    let config = Config::load_process()?;
    telemetry::initialise(&config)?;
    info!(
        target: PROCESS_TARGET,
        metrics_addr = %config.metrics_addr(),
        shutdown_timeout_ms = config.shutdown_timeout().as_millis(),
        "starting node console"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("nodectl-runtime")
        .build()
        .map_err(|source| LaunchError::Runtime { source })?;

    runtime.block_on(serve(&config))
}

async fn serve(config: &Config) -> Result<ShutdownReport, LaunchError> {
    let (signal_tx, signal_rx) = mpsc::channel(1);
    let _forwarder = spawn_signal_forwarder(signal_tx)?;
    let plan = ConsolePlan {
        io: ConsoleIo {
            input: BufReader::new(io::stdin()),
            prompt: io::stdout(),
            usage: io::stdout(),
            echo: io::stdout(),
        },
        backend: TracingBackend,
        session: session_source(config),
        service: MetricsServer::new(config.metrics_addr()),
        signals: signal_rx,
        reporter: Arc::new(StructuredLifecycleReporter::new()),
        shutdown_timeout: config.shutdown_timeout(),
    };
    run_console(plan).await
}

/// Runs the console with injected collaborators.
///
/// The listener thread is not joined. A read blocked on the input is
/// abandoned when the process exits.
pub(crate) async fn run_console<R, W, B, S, V>(
    plan: ConsolePlan<R, W, B, S, V>,
) -> Result<ShutdownReport, LaunchError>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
    B: Backend + 'static,
    S: SessionSource + 'static,
    V: BackgroundService,
{
    let ConsolePlan {
        io,
        backend,
        session,
        mut service,
        signals,
        reporter,
        shutdown_timeout,
    } = plan;
    let ConsoleIo {
        input,
        prompt,
        usage,
        echo,
    } = io;

    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let dispatcher = Dispatcher::new(backend, session, usage);
    InputListener::new(input, prompt, dispatcher)
        .spawn(event_tx)
        .map_err(|source| LaunchError::Listener { source })?;

    let (error_tx, error_rx) = mpsc::channel(1);
    service.start(error_tx);
    reporter.service_started();

    let channels = SupervisorChannels {
        events: event_rx,
        service_errors: error_rx,
        signals,
    };
    let supervisor = Supervisor::new(service, channels, echo, reporter, shutdown_timeout);
    Ok(supervisor.run().await)
}

fn session_source(config: &Config) -> Box<dyn SessionSource> {
    config.node_id().and_then(SessionId::new).map_or_else(
        || Box::new(EnvSession::new(SESSION_ENV_VAR)) as Box<dyn SessionSource>,
        |id| Box::new(FixedSession::new(Some(id))) as Box<dyn SessionSource>,
    )
}
