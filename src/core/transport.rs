//! Transport trait for secondary log destinations

use super::log_entry::LogEntry;

/// A destination that receives every entry a logger emits and decides on its
/// own whether to deliver it.
///
/// Implementations must not panic or block indefinitely in `log`; delivery
/// failures are reported on a diagnostic channel and never returned.
pub trait Transport: Send + Sync {
    /// Deliver the entry if `filter` accepts it
    fn log(&self, entry: &LogEntry);

    /// Whether this transport accepts the entry
    fn filter(&self, entry: &LogEntry) -> bool;

    fn name(&self) -> &str;
}
