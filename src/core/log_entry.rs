//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Timestamp layout used by the bundled appenders
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

// Thread-local cache of (id, name) to avoid repeated allocations
thread_local! {
    static THREAD_CACHE: RefCell<Option<(String, Option<String>)>> = const { RefCell::new(None) };
}

fn current_thread() -> (String, Option<String>) {
    THREAD_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let thread = std::thread::current();
                (format!("{:?}", thread.id()), thread.name().map(String::from))
            })
            .clone()
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Logger category, usually the declaring type of the intercepted method
    pub category: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    /// Error chain attached to exited-abnormally messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_trace: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Rendered parameters and return values come from callers, so newlines,
    /// carriage returns and tabs are escaped to keep one entry on one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, category: impl Into<String>, message: impl AsRef<str>) -> Self {
        let (thread_id, thread_name) = current_thread();
        Self {
            level,
            category: category.into(),
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            thread_id,
            thread_name,
            error_trace: None,
        }
    }

    pub fn with_error_trace(mut self, trace: impl Into<String>) -> Self {
        self.error_trace = Some(trace.into());
        self
    }

    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_sanitized() {
        let entry = LogEntry::new(LogLevel::Info, "svc", "line1\nline2\tend\r");
        assert_eq!(entry.message, "line1\\nline2\\tend\\r");
    }

    #[test]
    fn test_error_trace_is_kept_verbatim() {
        let entry = LogEntry::new(LogLevel::Error, "svc", "boom")
            .with_error_trace("NotFound: a\nCaused by: b");
        assert_eq!(entry.error_trace.as_deref(), Some("NotFound: a\nCaused by: b"));
        assert_eq!(entry.category, "svc");
    }

    #[test]
    fn test_thread_label_prefers_name() {
        let handle = std::thread::Builder::new()
            .name("worker-1".into())
            .spawn(|| LogEntry::new(LogLevel::Debug, "svc", "x"))
            .unwrap();
        let entry = handle.join().unwrap();
        assert_eq!(entry.thread_label(), "worker-1");
    }
}
