//! Redaction rules for sensitive parameters

use super::value::LogValue;
use crate::core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed text substituted for hidden values
pub const REDACTION_MARKER: &str = "*********";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Redaction {
    /// Hide the value entirely
    Hidden,
    /// Hide only the named fields (case-insensitive), at any depth.
    /// Without names the value is hidden entirely.
    Fields(Vec<String>),
}

impl Redaction {
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Redaction::Hidden
        } else {
            Redaction::Fields(names)
        }
    }

    /// Render `value` under this rule.
    ///
    /// `Fields` produces compact JSON with the listed names and
    /// `global_excludes` removed; any serialization failure yields the
    /// marker instead.
    pub fn render(&self, value: &LogValue, global_excludes: &[String]) -> String {
        match self {
            Redaction::Hidden => REDACTION_MARKER.to_string(),
            Redaction::Fields(names) if names.is_empty() => REDACTION_MARKER.to_string(),
            Redaction::Fields(names) => filtered_json(value, names, global_excludes)
                .unwrap_or_else(|_| REDACTION_MARKER.to_string()),
        }
    }
}

fn filtered_json(value: &LogValue, names: &[String], global_excludes: &[String]) -> Result<String> {
    let mut json = value.to_structured()?;
    let excluded: Vec<String> = names
        .iter()
        .chain(global_excludes)
        .map(|n| n.to_lowercase())
        .collect();
    strip_fields(&mut json, &excluded);
    Ok(serde_json::to_string(&json)?)
}

fn strip_fields(json: &mut Value, excluded: &[String]) {
    match json {
        Value::Object(map) => {
            map.retain(|key, _| !excluded.contains(&key.to_lowercase()));
            for child in map.values_mut() {
                strip_fields(child, excluded);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_fields(item, excluded);
            }
        }
        _ => {}
    }
}
