use super::{object::ObjectToStringConverter, ToStringConverter};
use crate::interpolation::value::LogValue;
use std::sync::Arc;

/// `Option`-like values: `null` when empty, otherwise the unwrapped value
pub struct OptionalToStringConverter {
    object: Arc<ObjectToStringConverter>,
}

impl OptionalToStringConverter {
    pub fn new(object: Arc<ObjectToStringConverter>) -> Self {
        Self { object }
    }
}

impl ToStringConverter for OptionalToStringConverter {
    fn supports(&self, value: &LogValue) -> bool {
        matches!(value, LogValue::Optional(_))
    }

    fn convert(&self, value: &LogValue) -> String {
        match value {
            LogValue::Optional(Some(inner)) => self.object.convert(inner),
            LogValue::Optional(None) => "null".to_string(),
            other => self.object.convert(other),
        }
    }

    fn name(&self) -> &str {
        "optional"
    }
}
