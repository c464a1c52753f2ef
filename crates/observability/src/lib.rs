//! Tracing and logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize a test-friendly subscriber (see [`tracing::init_for_tests`]).
pub fn init_for_tests() {
    tracing::init_for_tests();
}
