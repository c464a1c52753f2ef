//! Subscriber setup for the catalog service.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or does not parse.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the process-wide subscriber: one JSON object per event, with the
/// event fields flattened and the enclosing span attached.
///
/// Only the first call installs anything.
pub fn init() {
    let json = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(json)
        .try_init();
}

/// Compact, captured output for test binaries (`warn` unless `RUST_LOG` says otherwise).
pub fn init_for_tests() {
    let _ = tracing_subscriber::registry()
        .with(env_filter("warn"))
        .with(fmt::layer().compact().with_test_writer())
        .try_init();
}
