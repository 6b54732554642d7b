//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod sink;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use log_entry::{LogEntry, TIMESTAMP_FORMAT};
pub use log_level::{LevelOverride, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use sink::LogSink;
