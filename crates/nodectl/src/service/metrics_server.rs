//! Prometheus scrape endpoint served with `axum`.

use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{BackgroundService, SERVICE_TARGET, ServiceError, ServiceShutdownError, recorder};

/// HTTP endpoint exposing `/metrics` in Prometheus text format.
pub struct MetricsServer {
    addr: String,
    local_addr: Option<SocketAddr>,
    running: Option<RunningServer>,
}

struct RunningServer {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl MetricsServer {
    /// Builds a server that will bind `addr` (`host:port`) when started.
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            local_addr: None,
            running: None,
        }
    }

    /// Address actually bound, once started. Useful with port `0`.
    #[must_use]
    pub const fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    fn bind(&self) -> Result<TcpListener, ServiceError> {
        let bind_error = |source| ServiceError::Bind {
            addr: self.addr.clone(),
            source,
        };
        let listener = StdTcpListener::bind(self.addr.as_str()).map_err(bind_error)?;
        listener.set_nonblocking(true).map_err(bind_error)?;
        TcpListener::from_std(listener).map_err(bind_error)
    }
}

#[async_trait]
impl BackgroundService for MetricsServer {
    /// Binds synchronously and serves on a spawned task.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime with IO enabled.
    fn start(&mut self, errors: mpsc::Sender<ServiceError>) {
        if self.running.is_some() {
            debug!(target: SERVICE_TARGET, "metrics endpoint already started");
            return;
        }
        let handle = match recorder::install() {
            Ok(handle) => handle,
            Err(error) => return report(&errors, error),
        };
        let listener = match self.bind() {
            Ok(listener) => listener,
            Err(error) => return report(&errors, error),
        };
        self.local_addr = listener.local_addr().ok();
        info!(
            target: SERVICE_TARGET,
            addr = %self.addr,
            local_addr = ?self.local_addr,
            "metrics endpoint listening"
        );

        let app = Router::new().route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let shutdown = async {
                // A dropped sender also means stop.
                let _ignored = stopped.await;
            };
            if let Err(source) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                report(&errors, ServiceError::Serve { source });
            }
        });
        self.running = Some(RunningServer { stop, task });
    }

    async fn shutdown(&mut self, timeout: Duration) -> Result<(), ServiceShutdownError> {
        let Some(RunningServer { stop, mut task }) = self.running.take() else {
            return Ok(());
        };
        info!(
            target: SERVICE_TARGET,
            timeout_ms = timeout.as_millis(),
            "shutting down metrics endpoint"
        );
        if stop.send(()).is_err() {
            debug!(target: SERVICE_TARGET, "metrics endpoint already stopped");
        }
        match tokio::time::timeout(timeout, &mut task).await {
            Ok(Ok(())) => {
                info!(target: SERVICE_TARGET, "metrics endpoint shut down");
                Ok(())
            }
            Ok(Err(error)) => Err(ServiceShutdownError::Join {
                message: error.to_string(),
            }),
            Err(_) => {
                task.abort();
                Err(ServiceShutdownError::Timeout { timeout })
            }
        }
    }
}

fn report(errors: &mpsc::Sender<ServiceError>, error: ServiceError) {
    warn!(target: SERVICE_TARGET, error = %error, "metrics endpoint failure");
    if errors.try_send(error).is_err() {
        debug!(target: SERVICE_TARGET, "service error channel full or closed");
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use super::*;

    const WINDOW: Duration = Duration::from_secs(2);

    async fn scrape(addr: SocketAddr) -> String {
        let mut stream = TcpStream::connect(addr).await.expect("connect to endpoint");
        stream
            .write_all(b"GET /metrics HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .expect("write request");
        let mut response = String::new();
        stream
            .read_to_string(&mut response)
            .await
            .expect("read response");
        response
    }

    #[tokio::test]
    async fn serves_prometheus_text() {
        let (errors, _receiver) = mpsc::channel(1);
        let mut server = MetricsServer::new("127.0.0.1:0");
        server.start(errors);
        let addr = server.local_addr().expect("server should be bound");

        let response = scrape(addr).await;

        assert!(response.starts_with("HTTP/1.1 200"), "unexpected: {response}");
        assert!(response.contains("chain_block_height"));
        server.shutdown(WINDOW).await.expect("clean shutdown");
    }

    #[tokio::test]
    async fn graceful_shutdown_is_not_reported_as_failure() {
        let (errors, mut receiver) = mpsc::channel(1);
        let mut server = MetricsServer::new("127.0.0.1:0");
        server.start(errors);

        server.shutdown(WINDOW).await.expect("clean shutdown");

        assert!(
            receiver.recv().await.is_none(),
            "sender drops without reporting an error"
        );
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (errors, _receiver) = mpsc::channel(1);
        let mut server = MetricsServer::new("127.0.0.1:0");
        server.start(errors);

        server.shutdown(WINDOW).await.expect("first shutdown");
        server.shutdown(WINDOW).await.expect("second shutdown is a no-op");
    }

    #[tokio::test]
    async fn shutdown_without_start_succeeds() {
        let mut server = MetricsServer::new("127.0.0.1:0");
        server.shutdown(WINDOW).await.expect("never started");
        assert!(server.local_addr().is_none());
    }

    #[tokio::test]
    async fn bind_failure_is_reported_on_the_error_channel() {
        let occupied = StdTcpListener::bind("127.0.0.1:0").expect("occupy a port");
        let addr = occupied.local_addr().expect("local addr");
        let (errors, mut receiver) = mpsc::channel(1);
        let mut server = MetricsServer::new(addr.to_string());

        server.start(errors);

        let error = receiver.recv().await.expect("bind error reported");
        assert!(matches!(error, ServiceError::Bind { .. }));
        server.shutdown(WINDOW).await.expect("nothing to stop");
    }
}
