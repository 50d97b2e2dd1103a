//! Tracing setup for hosts embedding the container.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the application. This helper gives the usual setup.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `RUST_LOG` (default: info).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    init_tracing_with("info");
}

/// Same as [`init_tracing`] with an explicit fallback filter directive.
pub fn init_tracing_with(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init();
}
