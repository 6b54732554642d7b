//! Synchronous logger with per-category levels

use super::{
    appender::Appender, error::Result, log_entry::LogEntry, log_level::LogLevel, sink::LogSink,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Category separator used for level inheritance (`a::b` covers `a::b::C`)
const CATEGORY_SEPARATOR: &str = "::";

pub struct Logger {
    min_level: RwLock<LogLevel>,
    /// Per-category overrides; the longest matching prefix wins
    category_levels: RwLock<Vec<(String, LogLevel)>>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    /// Entries that at least one appender failed to write
    dropped_count: AtomicU64,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: RwLock::new(LogLevel::Info),
            category_levels: RwLock::new(Vec::new()),
            appenders: RwLock::new(Vec::new()),
            dropped_count: AtomicU64::new(0),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_call_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Warn)
    ///     .category_level("billing::invoices", LogLevel::Debug)
    ///     .build();
    ///
    /// assert!(logger.is_enabled("billing::invoices::InvoiceService", LogLevel::Debug));
    /// assert!(!logger.is_enabled("billing::payments", LogLevel::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Set the minimum level for a category and everything below it
    pub fn set_category_level(&self, category: impl Into<String>, level: LogLevel) {
        let category = category.into();
        let mut levels = self.category_levels.write();
        match levels.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 = level,
            None => levels.push((category, level)),
        }
    }

    /// Effective minimum level for a category
    pub fn min_level_for(&self, category: &str) -> LogLevel {
        let levels = self.category_levels.read();
        levels
            .iter()
            .filter(|(prefix, _)| Self::covers(prefix, category))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, level)| *level)
            .unwrap_or_else(|| *self.min_level.read())
    }

    fn covers(prefix: &str, category: &str) -> bool {
        match category.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with(CATEGORY_SEPARATOR),
            None => false,
        }
    }

    pub fn is_enabled(&self, category: &str, level: LogLevel) -> bool {
        level >= self.min_level_for(category)
    }

    pub fn log(&self, category: &str, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled(category, level) {
            return;
        }
        self.write_entry(&LogEntry::new(level, category, message));
    }

    #[inline]
    pub fn trace(&self, category: &str, message: impl AsRef<str>) {
        self.log(category, LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, category: &str, message: impl AsRef<str>) {
        self.log(category, LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, category: &str, message: impl AsRef<str>) {
        self.log(category, LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, category: &str, message: impl AsRef<str>) {
        self.log(category, LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, category: &str, message: impl AsRef<str>) {
        self.log(category, LogLevel::Error, message);
    }

    /// Write an entry to every appender
    ///
    /// **Per-Appender Panic Isolation**: each appender call is wrapped in
    /// `catch_unwind` so one broken appender never starves the others, and
    /// never unwinds into the intercepted call.
    fn write_entry(&self, entry: &LogEntry) {
        let mut appenders = self.appenders.write();
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} ({}) failed: {}", idx, appender.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            self.dropped_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Number of entries that an appender failed to write
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

impl LogSink for Logger {
    fn is_enabled(&self, category: &str, level: LogLevel) -> bool {
        Logger::is_enabled(self, category, level)
    }

    fn emit(&self, entry: LogEntry) {
        if Logger::is_enabled(self, &entry.category, entry.level) {
            self.write_entry(&entry);
        }
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    min_level: LogLevel,
    category_levels: Vec<(String, LogLevel)>,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            category_levels: Vec::new(),
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn category_level(mut self, category: impl Into<String>, level: LogLevel) -> Self {
        self.category_levels.push((category.into(), level));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new();
        logger.set_min_level(self.min_level);
        for (category, level) in self.category_levels {
            logger.set_category_level(category, level);
        }
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
