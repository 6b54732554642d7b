//! Appender implementations

#[cfg(feature = "console")]
pub mod console;
pub mod file;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use memory::MemoryAppender;

pub use crate::core::Appender;

use crate::core::LogEntry;

/// Plain single-line layout shared by the text appenders
pub(crate) fn format_line(entry: &LogEntry, level: &str) -> String {
    let mut line = format!(
        "[{}] [{}] [{}] {} - {}",
        entry.formatted_timestamp(),
        level,
        entry.thread_label(),
        entry.category,
        entry.message
    );
    if let Some(ref trace) = entry.error_trace {
        line.push('\n');
        line.push_str(trace);
    }
    line
}
