use super::{object::ObjectToStringConverter, render_elements, ToStringConverter};
use crate::interpolation::value::LogValue;
use std::sync::Arc;

/// Growable and iterable collections, rendered like arrays
pub struct IterableToStringConverter {
    object: Arc<ObjectToStringConverter>,
}

impl IterableToStringConverter {
    pub fn new(object: Arc<ObjectToStringConverter>) -> Self {
        Self { object }
    }

    pub fn render_items(&self, items: &[LogValue]) -> String {
        render_elements(items, &self.object)
    }
}

impl ToStringConverter for IterableToStringConverter {
    fn supports(&self, value: &LogValue) -> bool {
        matches!(value, LogValue::Sequence(_))
    }

    fn convert(&self, value: &LogValue) -> String {
        match value {
            LogValue::Sequence(items) => self.render_items(items),
            other => self.object.convert(other),
        }
    }

    fn name(&self) -> &str {
        "iterable"
    }
}
