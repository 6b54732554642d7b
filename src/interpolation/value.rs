//! Runtime values captured from an intercepted call
//!
//! Arguments and return values cross into the logger as [`LogValue`]s.
//! Plain data converts through [`AsLogValue`]; domain types implement
//! [`Loggable`] to expose their type identity and fields.

use super::redaction::Redaction;
use crate::core::{LoggerError, Result};
use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "paging")]
use crate::paging::{Page, Pageable, Slice};

/// Capability interface for domain objects that cross the logging boundary.
///
/// Only `fields` usually needs implementing. Everything else has a default
/// derived from the Rust type itself.
pub trait Loggable: fmt::Debug + Send + Sync + 'static {
    /// Fully qualified type name, e.g. `shop::orders::Order`
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Names of the types this value is assignable to (traits it stands in
    /// for, base shapes). Matched against the reflective allow-list.
    fn supertypes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Ordered `(name, value)` pairs
    fn fields(&self) -> Vec<(&'static str, LogValue)> {
        Vec::new()
    }

    /// Opt out of reflective rendering
    fn is_proxy(&self) -> bool {
        false
    }

    /// Redaction rule declared on the type itself
    fn redaction(&self) -> Option<Redaction> {
        None
    }

    /// The value's own string form, used when no converter renders it
    fn natural_string(&self) -> String {
        format!("{:?}", self)
    }

    /// Structured (JSON) form used for field-filtered redaction
    fn to_structured(&self) -> Result<Value> {
        let mut map = Map::new();
        for (name, value) in self.fields() {
            map.insert(name.to_string(), value.to_structured()?);
        }
        Ok(Value::Object(map))
    }
}

/// An owned snapshot of one runtime value.
///
/// `Array` is a fixed-size collection, `Sequence` any other iterable one.
#[derive(Debug, Clone, Default)]
pub enum LogValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Array(Vec<LogValue>),
    Sequence(Vec<LogValue>),
    Map(Vec<(LogValue, LogValue)>),
    Optional(Option<Box<LogValue>>),
    Object(Arc<dyn Loggable>),
    #[cfg(feature = "paging")]
    Page(Arc<Page>),
    #[cfg(feature = "paging")]
    Slice(Arc<Slice>),
    #[cfg(feature = "paging")]
    Pageable(Pageable),
}

impl LogValue {
    pub fn object<T: Loggable>(value: T) -> Self {
        LogValue::Object(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, LogValue::Null)
    }

    /// Short name of the variant, or the object's type name
    pub fn kind(&self) -> &'static str {
        match self {
            LogValue::Null => "null",
            LogValue::Bool(_) => "bool",
            LogValue::Int(_) => "int",
            LogValue::UInt(_) => "uint",
            LogValue::Float(_) => "float",
            LogValue::Char(_) => "char",
            LogValue::Str(_) => "string",
            LogValue::Array(_) => "array",
            LogValue::Sequence(_) => "sequence",
            LogValue::Map(_) => "map",
            LogValue::Optional(_) => "optional",
            LogValue::Object(obj) => obj.type_name(),
            #[cfg(feature = "paging")]
            LogValue::Page(_) => "page",
            #[cfg(feature = "paging")]
            LogValue::Slice(_) => "slice",
            #[cfg(feature = "paging")]
            LogValue::Pageable(_) => "pageable",
        }
    }

    /// Rule declared on the value's type, if it is an object
    pub fn declared_redaction(&self) -> Option<Redaction> {
        match self {
            LogValue::Object(obj) => obj.redaction(),
            _ => None,
        }
    }

    /// JSON form of the value. Fails on non-finite floats.
    pub fn to_structured(&self) -> Result<Value> {
        Ok(match self {
            LogValue::Null => Value::Null,
            LogValue::Bool(b) => Value::Bool(*b),
            LogValue::Int(i) => Value::from(*i),
            LogValue::UInt(u) => Value::from(*u),
            LogValue::Float(f) => Value::Number(
                Number::from_f64(*f)
                    .ok_or_else(|| LoggerError::conversion("f64", format!("{} is not representable", f)))?,
            ),
            LogValue::Char(c) => Value::String(c.to_string()),
            LogValue::Str(s) => Value::String(s.clone()),
            LogValue::Array(items) | LogValue::Sequence(items) => structured_list(items)?,
            LogValue::Map(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    let key = match key {
                        LogValue::Str(s) => s.clone(),
                        other => other.to_string(),
                    };
                    map.insert(key, value.to_structured()?);
                }
                Value::Object(map)
            }
            LogValue::Optional(inner) => match inner {
                Some(value) => value.to_structured()?,
                None => Value::Null,
            },
            LogValue::Object(obj) => obj.to_structured()?,
            #[cfg(feature = "paging")]
            LogValue::Page(page) => {
                let mut map = Map::new();
                map.insert("content".into(), structured_list(page.content())?);
                map.insert("pageable".into(), serde_json::to_value(page.pageable())?);
                map.insert("totalElements".into(), Value::from(page.total_elements()));
                map.insert("totalPages".into(), Value::from(page.total_pages()));
                Value::Object(map)
            }
            #[cfg(feature = "paging")]
            LogValue::Slice(slice) => {
                let mut map = Map::new();
                map.insert("content".into(), structured_list(slice.content())?);
                map.insert("pageable".into(), serde_json::to_value(slice.pageable())?);
                map.insert("hasNext".into(), Value::Bool(slice.has_next()));
                Value::Object(map)
            }
            #[cfg(feature = "paging")]
            LogValue::Pageable(pageable) => serde_json::to_value(pageable)?,
        })
    }
}

fn structured_list(items: &[LogValue]) -> Result<Value> {
    items
        .iter()
        .map(LogValue::to_structured)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[LogValue]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

/// Natural string form
impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Null => f.write_str("null"),
            LogValue::Bool(b) => write!(f, "{}", b),
            LogValue::Int(i) => write!(f, "{}", i),
            LogValue::UInt(u) => write!(f, "{}", u),
            LogValue::Float(x) => write!(f, "{}", x),
            LogValue::Char(c) => write!(f, "{}", c),
            LogValue::Str(s) => f.write_str(s),
            LogValue::Array(items) | LogValue::Sequence(items) => write_list(f, items),
            LogValue::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
            LogValue::Optional(Some(value)) => write!(f, "Some({})", value),
            LogValue::Optional(None) => f.write_str("None"),
            LogValue::Object(obj) => f.write_str(&obj.natural_string()),
            #[cfg(feature = "paging")]
            LogValue::Page(page) => write!(f, "{}", page),
            #[cfg(feature = "paging")]
            LogValue::Slice(slice) => write!(f, "{}", slice),
            #[cfg(feature = "paging")]
            LogValue::Pageable(pageable) => write!(f, "{}", pageable),
        }
    }
}

/// Conversion of a borrowed runtime value into a [`LogValue`].
pub trait AsLogValue {
    fn as_log_value(&self) -> LogValue;
}

macro_rules! signed_log_value {
    ($($t:ty),*) => {$(
        impl AsLogValue for $t {
            #[inline]
            fn as_log_value(&self) -> LogValue {
                LogValue::Int(*self as i64)
            }
        }
    )*};
}

macro_rules! unsigned_log_value {
    ($($t:ty),*) => {$(
        impl AsLogValue for $t {
            #[inline]
            fn as_log_value(&self) -> LogValue {
                LogValue::UInt(*self as u64)
            }
        }
    )*};
}

signed_log_value!(i8, i16, i32, i64, isize);
unsigned_log_value!(u8, u16, u32, u64, usize);

impl AsLogValue for f32 {
    #[inline]
    fn as_log_value(&self) -> LogValue {
        LogValue::Float(f64::from(*self))
    }
}

impl AsLogValue for f64 {
    #[inline]
    fn as_log_value(&self) -> LogValue {
        LogValue::Float(*self)
    }
}

impl AsLogValue for bool {
    #[inline]
    fn as_log_value(&self) -> LogValue {
        LogValue::Bool(*self)
    }
}

impl AsLogValue for char {
    #[inline]
    fn as_log_value(&self) -> LogValue {
        LogValue::Char(*self)
    }
}

impl AsLogValue for str {
    fn as_log_value(&self) -> LogValue {
        LogValue::Str(self.to_string())
    }
}

impl AsLogValue for String {
    fn as_log_value(&self) -> LogValue {
        LogValue::Str(self.clone())
    }
}

/// The unit value of a void call
impl AsLogValue for () {
    fn as_log_value(&self) -> LogValue {
        LogValue::Null
    }
}

impl AsLogValue for LogValue {
    fn as_log_value(&self) -> LogValue {
        self.clone()
    }
}

impl<T: AsLogValue + ?Sized> AsLogValue for &T {
    fn as_log_value(&self) -> LogValue {
        (**self).as_log_value()
    }
}

impl<T: AsLogValue + ?Sized> AsLogValue for Box<T> {
    fn as_log_value(&self) -> LogValue {
        (**self).as_log_value()
    }
}

impl<T: AsLogValue> AsLogValue for Option<T> {
    fn as_log_value(&self) -> LogValue {
        LogValue::Optional(self.as_ref().map(|v| Box::new(v.as_log_value())))
    }
}

impl<T: AsLogValue> AsLogValue for [T] {
    fn as_log_value(&self) -> LogValue {
        LogValue::Array(self.iter().map(AsLogValue::as_log_value).collect())
    }
}

impl<T: AsLogValue, const N: usize> AsLogValue for [T; N] {
    fn as_log_value(&self) -> LogValue {
        self.as_slice().as_log_value()
    }
}

macro_rules! sequence_log_value {
    ($($c:ident),*) => {$(
        impl<T: AsLogValue> AsLogValue for $c<T> {
            fn as_log_value(&self) -> LogValue {
                LogValue::Sequence(self.iter().map(AsLogValue::as_log_value).collect())
            }
        }
    )*};
}

sequence_log_value!(Vec, VecDeque, BTreeSet);

impl<T: AsLogValue, S> AsLogValue for HashSet<T, S> {
    fn as_log_value(&self) -> LogValue {
        LogValue::Sequence(self.iter().map(AsLogValue::as_log_value).collect())
    }
}

impl<K: AsLogValue, V: AsLogValue> AsLogValue for BTreeMap<K, V> {
    fn as_log_value(&self) -> LogValue {
        LogValue::Map(
            self.iter()
                .map(|(k, v)| (k.as_log_value(), v.as_log_value()))
                .collect(),
        )
    }
}

impl<K: AsLogValue, V: AsLogValue, S> AsLogValue for HashMap<K, V, S> {
    fn as_log_value(&self) -> LogValue {
        LogValue::Map(
            self.iter()
                .map(|(k, v)| (k.as_log_value(), v.as_log_value()))
                .collect(),
        )
    }
}

impl<T: Loggable> AsLogValue for Arc<T> {
    fn as_log_value(&self) -> LogValue {
        LogValue::Object(self.clone())
    }
}
