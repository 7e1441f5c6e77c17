//! Process-wide Prometheus recorder.

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use super::ServiceError;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Installs the global recorder on first use and returns its render handle.
pub(crate) fn install() -> Result<PrometheusHandle, ServiceError> {
    PROMETHEUS_HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|error| ServiceError::Recorder {
                    message: error.to_string(),
                })?;
            describe_series();
            Ok(handle)
        })
        .cloned()
}

fn describe_series() {
    describe_counter!(
        "blocks_mined_total",
        "Total number of blocks mined by this node"
    );
    describe_gauge!("chain_block_height", "Current blockchain height");
    describe_counter!(
        "console_commands_total",
        "Console lines processed, by command and outcome"
    );
    counter!("blocks_mined_total").absolute(0);
    gauge!("chain_block_height").set(0.0);
}
