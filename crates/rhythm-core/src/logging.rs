//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g. `rhythm_core=debug`.
pub const LOG_ENV: &str = "RHYTHM_LOG";

/// Install a stderr `fmt` subscriber filtered by `RHYTHM_LOG`, falling back
/// to `default_level`. A second call is a no-op.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
