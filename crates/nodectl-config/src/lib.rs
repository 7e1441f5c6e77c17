//! Shared configuration for the `nodectl` operator console.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, an optional
//! TOML file, `NODECTL_*` environment variables, and finally command-line
//! flags. The runtime crate only reads the resolved [`Config`] through its
//! accessors.

mod defaults;
mod logging;

use std::sync::Arc;
use std::time::Duration;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_METRICS_ADDR, DEFAULT_SHUTDOWN_TIMEOUT_MS, SESSION_ENV_VAR,
    default_log_filter, default_log_filter_string, default_log_format, default_metrics_addr,
    default_shutdown_timeout_ms,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for the console process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NODECTL")]
pub struct Config {
    /// `tracing` filter expression applied to the global subscriber.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Shape of emitted log lines.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Bind address of the background metrics endpoint.
    #[serde(default = "default_metrics_addr")]
    #[ortho_config(default = default_metrics_addr())]
    pub metrics_addr: String,
    /// Graceful shutdown window for the background service, in milliseconds.
    #[serde(default = "default_shutdown_timeout_ms")]
    #[ortho_config(default = default_shutdown_timeout_ms())]
    pub shutdown_timeout_ms: u64,
    /// Fixed session identity. When unset the identity is read from
    /// [`SESSION_ENV_VAR`] for every console line.
    #[serde(default)]
    pub node_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            metrics_addr: default_metrics_addr(),
            shutdown_timeout_ms: default_shutdown_timeout_ms(),
            node_id: None,
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when any layer fails to parse.
    pub fn load_process() -> Result<Self, Arc<OrthoError>> {
        Self::load()
    }

    /// Filter expression for the log subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Selected log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Bind address of the metrics endpoint.
    #[must_use]
    pub fn metrics_addr(&self) -> &str {
        self.metrics_addr.as_str()
    }

    /// Bounded window granted to the background service on shutdown.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Fixed session identity, if one was configured.
    #[must_use]
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_uses_documented_values() {
        let config = Config::default();
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.metrics_addr(), DEFAULT_METRICS_ADDR);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
        assert!(config.node_id().is_none());
    }

    #[test]
    fn blank_node_id_is_treated_as_absent() {
        let config = Config {
            node_id: Some("   ".to_owned()),
            ..Config::default()
        };
        assert!(config.node_id().is_none());
    }
}
