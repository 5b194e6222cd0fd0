//! Log subscriber setup for binaries
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the program embedding it.

use tracing_subscriber::EnvFilter;

/// Build the filter for a base level, still overridable via `RUST_LOG`
pub fn env_filter(level: &str) -> EnvFilter {
    let default = format!("{level},pulse_randomizer_core={level},pulse_randomizer={level}");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install a global fmt subscriber writing to stderr
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}
