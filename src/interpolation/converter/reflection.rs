use super::{FieldListBuilder, ToStringConverter};
use crate::config::ConverterProperties;
use crate::core::{LoggerError, Result};
use crate::interpolation::type_name::{is_valid_type_path, type_path_matches};
use crate::interpolation::value::{LogValue, Loggable};

/// Marker for fields holding `Null` when null values are not excluded
const NULL_FIELD: &str = "<null>";

/// Nested allow-listed objects deeper than this use their natural form
const MAX_NESTING: usize = 8;

/// Renders allow-listed objects as `[field=value,...]`.
///
/// An object qualifies when its type name, or one of its declared
/// supertypes, matches a configured base type and it is not a proxy. Fields
/// are dropped when their name is excluded, and, per flag, when they hold
/// null, an empty string or numeric zero.
pub struct ReflectionToStringConverter {
    base_types: Vec<String>,
    exclude_null_values: bool,
    exclude_empty_values: bool,
    exclude_zero_values: bool,
    /// Lower-cased; field names match case-insensitively
    exclude_field_names: Vec<String>,
}

impl ReflectionToStringConverter {
    /// Fails on a base type that is not a type path
    pub fn new(properties: &ConverterProperties) -> Result<Self> {
        let mut base_types = Vec::with_capacity(properties.base_types.len());
        for name in &properties.base_types {
            let name = name.trim();
            if !is_valid_type_path(name) {
                return Err(LoggerError::config(
                    "reflection-to-string.base-types",
                    format!("'{}' is not a type path", name),
                ));
            }
            base_types.push(name.to_string());
        }

        Ok(Self {
            base_types,
            exclude_null_values: properties.exclude_null_values,
            exclude_empty_values: properties.exclude_empty_values,
            exclude_zero_values: properties.exclude_zero_values,
            exclude_field_names: properties
                .effective_exclude_field_names()
                .iter()
                .map(|name| name.to_lowercase())
                .collect(),
        })
    }

    pub fn supports_object(&self, object: &dyn Loggable) -> bool {
        if object.is_proxy() {
            return false;
        }
        self.base_types.iter().any(|base| {
            type_path_matches(base, object.type_name())
                || object
                    .supertypes()
                    .iter()
                    .any(|supertype| type_path_matches(base, supertype))
        })
    }

    fn render_object(&self, object: &dyn Loggable, depth: usize) -> String {
        let mut builder = FieldListBuilder::new();
        for (name, value) in object.fields() {
            if self.exclude_field_names.contains(&name.to_lowercase())
                || self.is_excluded_value(&value)
            {
                continue;
            }
            builder.append(name, self.render_field(&value, depth));
        }
        builder.finish()
    }

    fn render_field(&self, value: &LogValue, depth: usize) -> String {
        match value {
            LogValue::Null => NULL_FIELD.to_string(),
            LogValue::Object(object) if depth < MAX_NESTING && self.supports_object(object.as_ref()) => {
                self.render_object(object.as_ref(), depth + 1)
            }
            other => other.to_string(),
        }
    }

    fn is_excluded_value(&self, value: &LogValue) -> bool {
        match value {
            LogValue::Null => self.exclude_null_values,
            LogValue::Str(s) => self.exclude_empty_values && s.is_empty(),
            LogValue::Int(i) => self.exclude_zero_values && *i == 0,
            LogValue::UInt(u) => self.exclude_zero_values && *u == 0,
            // positive zero only; -0.0 is kept
            LogValue::Float(f) => self.exclude_zero_values && f.to_bits() == 0f64.to_bits(),
            _ => false,
        }
    }
}

impl ToStringConverter for ReflectionToStringConverter {
    fn supports(&self, value: &LogValue) -> bool {
        match value {
            LogValue::Object(object) => self.supports_object(object.as_ref()),
            _ => false,
        }
    }

    fn convert(&self, value: &LogValue) -> String {
        match value {
            LogValue::Object(object) => self.render_object(object.as_ref(), 0),
            other => other.to_string(),
        }
    }

    fn name(&self) -> &str {
        "reflection"
    }
}
