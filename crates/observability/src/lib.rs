//! Tracing/logging setup shared by the binaries.

/// Initialize process-wide tracing with the format chosen by
/// `TALLER_LOG_FORMAT` (JSON unless it says `pretty`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;
