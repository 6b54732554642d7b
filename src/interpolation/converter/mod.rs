//! Value-to-string converters and the chain that selects between them

pub mod array;
pub mod iterable;
pub mod object;
pub mod optional;
#[cfg(feature = "paging")]
pub mod paging;
pub mod reflection;

pub use array::ArrayToStringConverter;
pub use iterable::IterableToStringConverter;
pub use object::ObjectToStringConverter;
pub use optional::OptionalToStringConverter;
#[cfg(feature = "paging")]
pub use paging::{PageToStringConverter, PageableToStringConverter, SliceToStringConverter};
pub use reflection::ReflectionToStringConverter;

use super::value::LogValue;
use crate::config::ConverterProperties;
use crate::core::Result;
use std::fmt;
use std::sync::Arc;

/// A strategy that renders the values it supports
pub trait ToStringConverter: Send + Sync {
    fn supports(&self, value: &LogValue) -> bool;

    fn convert(&self, value: &LogValue) -> String;

    fn name(&self) -> &str;
}

/// Ordered converter registry with the object converter as fallback.
///
/// The object converter is kept apart from the ordered list so it is never
/// selected ahead of a more specific converter. The chain is immutable once
/// built and safe to share between threads.
pub struct ConverterChain {
    object: Arc<ObjectToStringConverter>,
    converters: Vec<Arc<dyn ToStringConverter>>,
}

impl ConverterChain {
    /// The default chain for `properties`
    pub fn new(properties: &ConverterProperties) -> Result<Self> {
        Self::builder(properties.clone()).build()
    }

    pub fn builder(properties: ConverterProperties) -> ConverterChainBuilder {
        ConverterChainBuilder::new(properties)
    }

    /// First converter in registration order that supports `value`, or the
    /// object converter. `Null` always goes to the object converter.
    pub fn find_converter_or_default(&self, value: &LogValue) -> &dyn ToStringConverter {
        if value.is_null() {
            return self.object.as_ref();
        }
        self.converters
            .iter()
            .find(|converter| converter.supports(value))
            .map_or(self.object.as_ref() as &dyn ToStringConverter, |converter| {
                converter.as_ref()
            })
    }

    pub fn render(&self, value: &LogValue) -> String {
        self.find_converter_or_default(value).convert(value)
    }

    pub fn object_converter(&self) -> &ObjectToStringConverter {
        &self.object
    }

    /// Registered converter names, in selection order
    pub fn converter_names(&self) -> Vec<&str> {
        self.converters.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Debug for ConverterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterChain")
            .field("converters", &self.converter_names())
            .finish()
    }
}

/// Builder for [`ConverterChain`]
///
/// # Example
/// ```
/// use rust_call_logger::config::ConverterProperties;
/// use rust_call_logger::interpolation::{AsLogValue, ConverterChain};
///
/// let chain = ConverterChain::builder(ConverterProperties::default())
///     .build()
///     .unwrap();
///
/// assert_eq!(chain.render(&vec![1, 2].as_log_value()), "[1, 2]");
/// ```
pub struct ConverterChainBuilder {
    properties: ConverterProperties,
    custom: Vec<Arc<dyn ToStringConverter>>,
}

impl ConverterChainBuilder {
    pub fn new(properties: ConverterProperties) -> Self {
        Self {
            properties,
            custom: Vec::new(),
        }
    }

    /// Append a converter after the built-in ones
    #[must_use = "builder methods return a new value"]
    pub fn converter<C: ToStringConverter + 'static>(mut self, converter: C) -> Self {
        self.custom.push(Arc::new(converter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_converter(mut self, converter: Arc<dyn ToStringConverter>) -> Self {
        self.custom.push(converter);
        self
    }

    /// Fails when an allow-listed base type is not a type path
    pub fn build(self) -> Result<ConverterChain> {
        let reflection = Arc::new(ReflectionToStringConverter::new(&self.properties)?);
        let object = Arc::new(ObjectToStringConverter::new(reflection.clone()));
        let iterable = Arc::new(IterableToStringConverter::new(object.clone()));

        let mut converters: Vec<Arc<dyn ToStringConverter>> = vec![
            reflection,
            Arc::new(OptionalToStringConverter::new(object.clone())),
            Arc::new(ArrayToStringConverter::new(object.clone())),
            iterable.clone(),
        ];

        #[cfg(feature = "paging")]
        converters.extend([
            Arc::new(SliceToStringConverter::new(iterable.clone())) as Arc<dyn ToStringConverter>,
            Arc::new(PageToStringConverter::new(iterable.clone())),
            Arc::new(PageableToStringConverter),
        ]);

        converters.extend(self.custom);

        Ok(ConverterChain { object, converters })
    }
}

/// Renders `[name=value,name=value]`
pub(crate) struct FieldListBuilder {
    buffer: String,
    first: bool,
}

impl FieldListBuilder {
    pub(crate) fn new() -> Self {
        Self {
            buffer: String::from("["),
            first: true,
        }
    }

    pub(crate) fn append(&mut self, name: &str, value: impl fmt::Display) -> &mut Self {
        self.separator();
        self.buffer.push_str(name);
        self.buffer.push('=');
        self.buffer.push_str(&value.to_string());
        self
    }

    /// A bare value without a name
    pub(crate) fn append_value(&mut self, value: impl fmt::Display) -> &mut Self {
        self.separator();
        self.buffer.push_str(&value.to_string());
        self
    }

    fn separator(&mut self) {
        if !self.first {
            self.buffer.push(',');
        }
        self.first = false;
    }

    pub(crate) fn finish(&mut self) -> String {
        let mut out = std::mem::take(&mut self.buffer);
        out.push(']');
        out
    }
}

/// `[e0, e1]` with every element rendered by the object converter
pub(crate) fn render_elements(items: &[LogValue], object: &ObjectToStringConverter) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&object.convert(item));
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::value::AsLogValue;

    fn chain() -> ConverterChain {
        ConverterChain::new(&ConverterProperties::default()).unwrap()
    }

    #[test]
    fn test_null_selects_object_converter() {
        let chain = chain();
        let converter = chain.find_converter_or_default(&LogValue::Null);
        assert_eq!(converter.name(), "object");
        assert_eq!(converter.convert(&LogValue::Null), "null");
    }

    #[test]
    fn test_empty_array_renders_brackets() {
        let chain = chain();
        let empty: [i32; 0] = [];
        let value = empty.as_log_value();
        assert_eq!(chain.find_converter_or_default(&value).name(), "array");
        assert_eq!(chain.render(&value), "[]");
    }

    #[test]
    fn test_selection_by_kind() {
        let chain = chain();
        assert_eq!(chain.find_converter_or_default(&vec![1].as_log_value()).name(), "iterable");
        assert_eq!(chain.find_converter_or_default(&Some(1).as_log_value()).name(), "optional");
        assert_eq!(chain.find_converter_or_default(&42i32.as_log_value()).name(), "object");
        assert_eq!(chain.render(&"plain".as_log_value()), "plain");
    }

    #[test]
    fn test_registration_order() {
        let chain = chain();
        let names = chain.converter_names();
        assert_eq!(&names[..4], &["reflection", "optional", "array", "iterable"]);
    }

    #[test]
    fn test_custom_converter_is_consulted_after_builtins() {
        struct Shouting;

        impl ToStringConverter for Shouting {
            fn supports(&self, value: &LogValue) -> bool {
                matches!(value, LogValue::Str(_))
            }

            fn convert(&self, value: &LogValue) -> String {
                value.to_string().to_uppercase()
            }

            fn name(&self) -> &str {
                "shouting"
            }
        }

        let chain = ConverterChain::builder(ConverterProperties::default())
            .converter(Shouting)
            .build()
            .unwrap();
        assert_eq!(chain.render(&"quiet".as_log_value()), "QUIET");
        assert_eq!(chain.converter_names().last(), Some(&"shouting"));
    }

    #[test]
    fn test_field_list_builder() {
        let mut builder = FieldListBuilder::new();
        builder.append("a", 1).append("b", "x");
        assert_eq!(builder.finish(), "[a=1,b=x]");
        assert_eq!(FieldListBuilder::new().finish(), "[]");
    }
}
