//! Structured JSON logging on top of `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber with the [`DEFAULT_DIRECTIVE`] fallback.
///
/// Calling it again (every test does) is a no-op.
pub fn init() {
    init_with_default(DEFAULT_DIRECTIVE);
}

/// Install the global subscriber, falling back to `directive` when `RUST_LOG`
/// does not provide a usable filter.
pub fn init_with_default(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // One JSON object per event; registry fields (store, warehouse, item, ...)
    // land as top-level keys.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}
