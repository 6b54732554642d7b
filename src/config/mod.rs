//! Process-wide logging defaults
//!
//! [`LoggerProperties`] holds the default level and template for every
//! logging moment, the global ignore list and the converter policy. Per-call
//! records ([`LogBefore`](crate::advice::LogBefore) and friends) override
//! these field by field.
//!
//! Properties load from TOML or JSON with kebab-case keys:
//!
//! ```toml
//! entering-level = "INFO"
//! ignore-exceptions = ["std::io::Error"]
//!
//! [reflection-to-string]
//! base-types = ["shop::Order"]
//! exclude-field-names = ["token"]
//! ```

use crate::advice::ErrorMatcher;
use crate::core::{LogLevel, LoggerError, Result};
use crate::interpolation::type_name::is_valid_type_path;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Field names that the reflective converter always hides
pub const SENSITIVE_FIELD_NAMES: [&str; 4] = ["username", "password", "passphrase", "secret"];

pub const DEFAULT_ENTERING_MESSAGE: &str = "Entering [{method}] with parameters [{parameters}]";
pub const DEFAULT_EXITED_MESSAGE: &str =
    "[{method}] exited normally with return value [{return-value}]";
pub const DEFAULT_EXITED_ABNORMALLY_MESSAGE: &str =
    "[{method}] exited abnormally with exception [{exception}]";
pub const DEFAULT_ELAPSED_MESSAGE: &str = "[{method}] elapsed [{elapsed}]";
pub const DEFAULT_ELAPSED_WARNING_MESSAGE: &str =
    "[{method}] reached elapsed time limit [{elapsed-time-limit}]";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggerProperties {
    /// Master switch; when off every lifecycle is a no-op
    pub enabled: bool,
    pub entering_level: LogLevel,
    pub entering_message: String,
    pub exited_level: LogLevel,
    pub exited_message: String,
    pub exited_abnormally_level: LogLevel,
    pub exited_abnormally_message: String,
    /// Errors that never produce an exited-abnormally message
    pub ignore_exceptions: Vec<ErrorMatcher>,
    pub elapsed_level: LogLevel,
    pub elapsed_message: String,
    pub elapsed_warning_level: LogLevel,
    pub elapsed_warning_message: String,
    pub reflection_to_string: ConverterProperties,
}

impl Default for LoggerProperties {
    fn default() -> Self {
        Self {
            enabled: true,
            entering_level: LogLevel::Debug,
            entering_message: DEFAULT_ENTERING_MESSAGE.to_string(),
            exited_level: LogLevel::Debug,
            exited_message: DEFAULT_EXITED_MESSAGE.to_string(),
            exited_abnormally_level: LogLevel::Error,
            exited_abnormally_message: DEFAULT_EXITED_ABNORMALLY_MESSAGE.to_string(),
            ignore_exceptions: Vec::new(),
            elapsed_level: LogLevel::Debug,
            elapsed_message: DEFAULT_ELAPSED_MESSAGE.to_string(),
            elapsed_warning_level: LogLevel::Warn,
            elapsed_warning_message: DEFAULT_ELAPSED_WARNING_MESSAGE.to_string(),
            reflection_to_string: ConverterProperties::default(),
        }
    }
}

impl LoggerProperties {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let properties: Self = toml::from_str(content)?;
        properties.validate()?;
        Ok(properties)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let properties: Self = serde_json::from_str(content)?;
        properties.validate()?;
        Ok(properties)
    }

    /// Load from a `.toml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(LoggerError::config(
                "properties",
                format!(
                    "unsupported file extension '{}' for {}",
                    other.unwrap_or(""),
                    path.display()
                ),
            )),
        }
    }

    #[must_use]
    pub fn ignore(mut self, matcher: ErrorMatcher) -> Self {
        self.ignore_exceptions.push(matcher);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("exited-message", &self.exited_message),
            ("exited-abnormally-message", &self.exited_abnormally_message),
            ("elapsed-message", &self.elapsed_message),
            ("elapsed-warning-message", &self.elapsed_warning_message),
        ];
        for (key, template) in required {
            if template.trim().is_empty() {
                return Err(LoggerError::config(key, "must not be blank"));
            }
        }

        for matcher in &self.ignore_exceptions {
            if let Some(name) = matcher.configured_name() {
                if !is_valid_type_path(name) {
                    return Err(LoggerError::config(
                        "ignore-exceptions",
                        format!("'{}' is not a type path", name),
                    ));
                }
            }
        }

        self.reflection_to_string.validate()
    }
}

/// Policy for the reflective field-list converter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConverterProperties {
    /// Types rendered field by field; empty means reflective rendering is off
    #[serde(alias = "base-classes")]
    pub base_types: Vec<String>,
    pub exclude_null_values: bool,
    pub exclude_empty_values: bool,
    pub exclude_zero_values: bool,
    /// Hidden in addition to [`SENSITIVE_FIELD_NAMES`]
    pub exclude_field_names: Vec<String>,
}

impl Default for ConverterProperties {
    fn default() -> Self {
        Self {
            base_types: Vec::new(),
            exclude_null_values: true,
            exclude_empty_values: true,
            exclude_zero_values: true,
            exclude_field_names: Vec::new(),
        }
    }
}

impl ConverterProperties {
    /// Sensitive names first, then the configured ones, without duplicates
    pub fn effective_exclude_field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = SENSITIVE_FIELD_NAMES.iter().map(|s| s.to_string()).collect();
        for name in &self.exclude_field_names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    pub fn validate(&self) -> Result<()> {
        for name in &self.base_types {
            if !is_valid_type_path(name.trim()) {
                return Err(LoggerError::config(
                    "reflection-to-string.base-types",
                    format!("'{}' is not a type path", name),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let props = LoggerProperties::default();
        assert!(props.enabled);
        assert_eq!(props.entering_level, LogLevel::Debug);
        assert_eq!(props.exited_abnormally_level, LogLevel::Error);
        assert_eq!(props.elapsed_warning_level, LogLevel::Warn);
        assert_eq!(props.elapsed_message, "[{method}] elapsed [{elapsed}]");
        assert!(props.reflection_to_string.exclude_zero_values);
        assert!(props.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_merge_with_defaults() {
        let props = LoggerProperties::from_toml_str(
            r#"
            entering-level = "info"
            exited-message = "done {method}"
            ignore-exceptions = ["std::num::ParseIntError", "NotFound"]

            [reflection-to-string]
            base-types = ["shop::Order"]
            exclude-null-values = false
            exclude-field-names = ["token"]
            "#,
        )
        .unwrap();

        assert_eq!(props.entering_level, LogLevel::Info);
        assert_eq!(props.exited_message, "done {method}");
        assert_eq!(props.exited_level, LogLevel::Debug);
        assert_eq!(props.ignore_exceptions.len(), 2);
        assert_eq!(props.reflection_to_string.base_types, vec!["shop::Order"]);
        assert!(!props.reflection_to_string.exclude_null_values);
        assert!(props.reflection_to_string.exclude_empty_values);
    }

    #[test]
    fn test_json_source() {
        let props = LoggerProperties::from_json_str(
            r#"{"enabled": false, "elapsed-warning-level": "ERROR"}"#,
        )
        .unwrap();
        assert!(!props.enabled);
        assert_eq!(props.elapsed_warning_level, LogLevel::Error);
    }

    #[test]
    fn test_legacy_base_classes_key() {
        let props =
            LoggerProperties::from_toml_str("[reflection-to-string]\nbase-classes = [\"a::B\"]")
                .unwrap();
        assert_eq!(props.reflection_to_string.base_types, vec!["a::B"]);
    }

    #[test]
    fn test_malformed_base_type_is_fatal() {
        let err = LoggerProperties::from_toml_str(
            "[reflection-to-string]\nbase-types = [\"shop::\"]",
        )
        .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("reflection-to-string.base-types"));
    }

    #[test]
    fn test_malformed_ignore_name_is_fatal() {
        let err = LoggerProperties::from_toml_str("ignore-exceptions = [\"not a type\"]").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_blank_template_is_fatal() {
        let err = LoggerProperties::from_toml_str("elapsed-message = \"  \"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration for elapsed-message: must not be blank"
        );
    }

    #[test]
    fn test_effective_exclude_field_names() {
        let props = ConverterProperties {
            exclude_field_names: vec!["token".into(), "password".into()],
            ..Default::default()
        };
        assert_eq!(
            props.effective_exclude_field_names(),
            vec!["username", "password", "passphrase", "secret", "token"]
        );
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("logging.toml");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(file, "exited-level = \"WARN\"").unwrap();
        assert_eq!(
            LoggerProperties::load(&toml_path).unwrap().exited_level,
            LogLevel::Warn
        );

        let yaml_path = dir.path().join("logging.yaml");
        std::fs::write(&yaml_path, "enabled: true").unwrap();
        assert!(LoggerProperties::load(&yaml_path).unwrap_err().is_configuration());
    }
}
