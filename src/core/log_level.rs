//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_str().to_string()
    }
}

/// Level carried by a per-call logging intent.
///
/// `Default` is the "unset, inherit" sentinel: it never reaches a sink, it is
/// always resolved against the process-wide default for the logging moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LevelOverride {
    #[default]
    Default,
    Level(LogLevel),
}

impl LevelOverride {
    /// The concrete level: this override unless it is `Default`.
    #[inline]
    pub fn resolve(self, default: LogLevel) -> LogLevel {
        match self {
            LevelOverride::Default => default,
            LevelOverride::Level(level) => level,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, LevelOverride::Default)
    }
}

impl From<LogLevel> for LevelOverride {
    fn from(level: LogLevel) -> Self {
        LevelOverride::Level(level)
    }
}

impl fmt::Display for LevelOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelOverride::Default => write!(f, "DEFAULT"),
            LevelOverride::Level(level) => write!(f, "{}", level),
        }
    }
}

impl FromStr for LevelOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("DEFAULT") {
            return Ok(LevelOverride::Default);
        }
        s.parse().map(LevelOverride::Level)
    }
}

impl TryFrom<String> for LevelOverride {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<LevelOverride> for String {
    fn from(level: LevelOverride) -> Self {
        level.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("FATAL".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_override_resolution() {
        assert_eq!(LevelOverride::Default.resolve(LogLevel::Debug), LogLevel::Debug);
        assert_eq!(
            LevelOverride::Level(LogLevel::Error).resolve(LogLevel::Debug),
            LogLevel::Error
        );
    }

    #[test]
    fn test_override_parse() {
        assert_eq!("default".parse::<LevelOverride>(), Ok(LevelOverride::Default));
        assert_eq!(
            "INFO".parse::<LevelOverride>(),
            Ok(LevelOverride::Level(LogLevel::Info))
        );
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");

        let level: LevelOverride = serde_json::from_str("\"DEFAULT\"").unwrap();
        assert!(level.is_default());
    }

    #[test]
    fn test_try_from_string() {
        assert_eq!(LogLevel::try_from("error".to_string()), Ok(LogLevel::Error));
        assert_eq!(
            LevelOverride::try_from("Warn".to_string()),
            Ok(LevelOverride::Level(LogLevel::Warn))
        );
        assert!(LogLevel::try_from("loud".to_string()).is_err());
    }
}
