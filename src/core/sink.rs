//! Outbound seam between the interception lifecycles and a log backend

use super::{log_entry::LogEntry, log_level::LogLevel};
use std::sync::Arc;

/// An already-synchronized destination for rendered messages.
///
/// Lifecycles ask [`is_enabled`](LogSink::is_enabled) before doing any
/// rendering work, then hand over one finished [`LogEntry`] per message.
pub trait LogSink: Send + Sync {
    fn is_enabled(&self, category: &str, level: LogLevel) -> bool;

    fn emit(&self, entry: LogEntry);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    #[inline]
    fn is_enabled(&self, category: &str, level: LogLevel) -> bool {
        (**self).is_enabled(category, level)
    }

    #[inline]
    fn emit(&self, entry: LogEntry) {
        (**self).emit(entry)
    }
}

impl<S: LogSink + ?Sized> LogSink for &S {
    #[inline]
    fn is_enabled(&self, category: &str, level: LogLevel) -> bool {
        (**self).is_enabled(category, level)
    }

    #[inline]
    fn emit(&self, entry: LogEntry) {
        (**self).emit(entry)
    }
}
