use super::{reflection::ReflectionToStringConverter, ToStringConverter};
use crate::interpolation::value::LogValue;
use std::sync::Arc;

/// Fallback converter: matches every value.
///
/// `Null` renders as `null`; objects on the reflective allow-list go to the
/// reflective converter; everything else uses its natural string form.
pub struct ObjectToStringConverter {
    reflection: Arc<ReflectionToStringConverter>,
}

impl ObjectToStringConverter {
    pub fn new(reflection: Arc<ReflectionToStringConverter>) -> Self {
        Self { reflection }
    }
}

impl ToStringConverter for ObjectToStringConverter {
    fn supports(&self, _value: &LogValue) -> bool {
        true
    }

    fn convert(&self, value: &LogValue) -> String {
        if self.reflection.supports(value) {
            self.reflection.convert(value)
        } else {
            value.to_string()
        }
    }

    fn name(&self) -> &str {
        "object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConverterProperties;
    use crate::interpolation::value::{AsLogValue, Loggable};

    #[derive(Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Loggable for Point {
        fn fields(&self) -> Vec<(&'static str, LogValue)> {
            vec![("x", self.x.as_log_value()), ("y", self.y.as_log_value())]
        }
    }

    fn converter(base_types: &[&str]) -> ObjectToStringConverter {
        let props = ConverterProperties {
            base_types: base_types.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        ObjectToStringConverter::new(Arc::new(ReflectionToStringConverter::new(&props).unwrap()))
    }

    #[test]
    fn test_null_and_scalars() {
        let converter = converter(&[]);
        assert!(converter.supports(&LogValue::Null));
        assert_eq!(converter.convert(&LogValue::Null), "null");
        assert_eq!(converter.convert(&true.as_log_value()), "true");
        assert_eq!(converter.convert(&'c'.as_log_value()), "c");
    }

    #[test]
    fn test_objects_use_natural_form_unless_allow_listed() {
        let point = LogValue::object(Point { x: 1, y: 2 });
        assert_eq!(converter(&[]).convert(&point), "Point { x: 1, y: 2 }");
        assert_eq!(converter(&["Point"]).convert(&point), "[x=1,y=2]");
    }
}
