//! Tracing initialization.
//!
//! Reads `TRIAD_QUIET`, `TRIAD_LOG_LEVEL` and `TRIAD_LOG_JSON` through
//! [`ObservabilityConfig`](crate::config::ObservabilityConfig). `RUST_LOG`
//! takes precedence over `TRIAD_LOG_LEVEL` when set.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call once at process startup; later calls are no-ops.
/// Quiet mode logs WARN and above only.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = if cfg.quiet {
        "triad=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}
