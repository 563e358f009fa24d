//! Tracing/logging setup shared by rolegate consumers and tests.

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let _ = tracing::init();
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
