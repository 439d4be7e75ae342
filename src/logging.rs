//! Structured logging setup. Logs go to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global `tracing` subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("acme_synth=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
