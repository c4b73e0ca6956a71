//! Tracing subscriber setup.
//!
//! Library crates only emit events through the `tracing` macros; binaries call
//! [`init_tracing`] once at startup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "KTSIFT_LOG";

/// Default filter when `KTSIFT_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber filtered by `KTSIFT_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_FILTER);
}

/// Like [`init_tracing`] but with a caller-chosen fallback filter.
pub fn init_tracing_with_default(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
