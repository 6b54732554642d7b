use super::{object::ObjectToStringConverter, render_elements, ToStringConverter};
use crate::interpolation::value::LogValue;
use std::sync::Arc;

/// Fixed-size collections: `[e0, e1]`, `[]` when empty
pub struct ArrayToStringConverter {
    object: Arc<ObjectToStringConverter>,
}

impl ArrayToStringConverter {
    pub fn new(object: Arc<ObjectToStringConverter>) -> Self {
        Self { object }
    }
}

impl ToStringConverter for ArrayToStringConverter {
    fn supports(&self, value: &LogValue) -> bool {
        matches!(value, LogValue::Array(_))
    }

    fn convert(&self, value: &LogValue) -> String {
        match value {
            LogValue::Array(items) => render_elements(items, &self.object),
            other => self.object.convert(other),
        }
    }

    fn name(&self) -> &str {
        "array"
    }
}
