//! Console appender implementation

use super::format_line;
use crate::core::{Appender, LogEntry, LogLevel, Result};
use colored::Colorize;

pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn format_text(&self, entry: &LogEntry) -> String {
        let level = format!("{:5}", entry.level.to_str());
        if self.use_colors {
            format_line(entry, &level.color(entry.level.color_code()).to_string())
        } else {
            format_line(entry, &level)
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.format_text(entry);

        // Errors go to stderr, everything else to stdout
        match entry.level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_layout_contains_category_and_message() {
        let appender = ConsoleAppender::with_colors(false);
        let entry = LogEntry::new(LogLevel::Warn, "shop::Cart", "slow");
        let text = appender.format_text(&entry);
        assert!(text.contains("[WARN ]"));
        assert!(text.ends_with("shop::Cart - slow"));
    }
}
