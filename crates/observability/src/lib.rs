//! Process-wide tracing/logging setup for the catalog service.

/// Tracing subscriber configuration (filters, formatting).
pub mod tracing;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}
