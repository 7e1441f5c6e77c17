use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default bind address for the metrics endpoint.
pub const DEFAULT_METRICS_ADDR: &str = "127.0.0.1:2112";

/// Default graceful shutdown window in milliseconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5_000;

/// Environment variable carrying the session identity when none is configured.
pub const SESSION_ENV_VAR: &str = "NODE_ID";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
///
/// Compact output keeps stderr readable next to the interactive prompt.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned default metrics bind address.
#[must_use]
pub fn default_metrics_addr() -> String {
    DEFAULT_METRICS_ADDR.to_owned()
}

/// Default graceful shutdown window in milliseconds.
#[must_use]
pub const fn default_shutdown_timeout_ms() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_MS
}
