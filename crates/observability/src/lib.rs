//! Tracing/logging setup shared by hosts and integration tests.

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;
