//! Execution context handed over by the interception mechanism

use crate::interpolation::redaction::Redaction;
use crate::interpolation::type_name::{normalize_type_name, simple_type_name, type_path_matches};
use crate::interpolation::value::LogValue;
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

const VOID_TYPES: [&str; 2] = ["void", "()"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    type_name: String,
    redaction: Option<Redaction>,
}

impl ParameterDescriptor {
    pub fn new(type_name: impl AsRef<str>) -> Self {
        Self {
            type_name: normalize_type_name(type_name.as_ref()),
            redaction: None,
        }
    }

    #[must_use]
    pub fn redacted(mut self, redaction: Redaction) -> Self {
        self.redaction = Some(redaction);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn redaction(&self) -> Option<&Redaction> {
        self.redaction.as_ref()
    }
}

/// Static description of an intercepted method.
///
/// # Example
/// ```
/// use rust_call_logger::advice::MethodDescriptor;
///
/// let method = MethodDescriptor::new("shop::orders::OrderService", "place")
///     .param("shop::orders::Order")
///     .param("u32")
///     .returns("Result<OrderId, OrderError>");
///
/// assert_eq!(method.signature(), "Result<OrderId, OrderError> place(Order, u32)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    declaring_type: String,
    name: String,
    return_type: String,
    parameters: Vec<ParameterDescriptor>,
    do_not_log: bool,
}

impl MethodDescriptor {
    /// A method returning `()` with no parameters
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            return_type: "()".to_string(),
            parameters: Vec::new(),
            do_not_log: false,
        }
    }

    #[must_use]
    pub fn param(mut self, type_name: impl AsRef<str>) -> Self {
        self.parameters.push(ParameterDescriptor::new(type_name));
        self
    }

    #[must_use]
    pub fn redacted_param(mut self, type_name: impl AsRef<str>, redaction: Redaction) -> Self {
        self.parameters
            .push(ParameterDescriptor::new(type_name).redacted(redaction));
        self
    }

    #[must_use]
    pub fn returns(mut self, type_name: impl AsRef<str>) -> Self {
        self.return_type = normalize_type_name(type_name.as_ref());
        self
    }

    /// Suppress every message about this method
    #[must_use]
    pub fn do_not_log(mut self) -> Self {
        self.do_not_log = true;
        self
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn is_do_not_log(&self) -> bool {
        self.do_not_log
    }

    pub fn is_void(&self) -> bool {
        VOID_TYPES.contains(&self.return_type.as_str())
    }

    /// `Ret name(P1, P2)` with module paths stripped
    pub fn signature(&self) -> String {
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|p| simple_type_name(p.type_name()))
            .collect();
        format!(
            "{} {}({})",
            simple_type_name(&self.return_type),
            self.name,
            parameters.join(", ")
        )
    }
}

/// One intercepted call: the method and the arguments it received
#[derive(Debug, Clone)]
pub struct Invocation<'m> {
    method: &'m MethodDescriptor,
    args: Vec<LogValue>,
}

impl<'m> Invocation<'m> {
    pub fn new(method: &'m MethodDescriptor, args: Vec<LogValue>) -> Self {
        Self { method, args }
    }

    pub fn method(&self) -> &'m MethodDescriptor {
        self.method
    }

    pub fn args(&self) -> &[LogValue] {
        &self.args
    }
}

/// An error raised by an intercepted call, borrowed for the duration of
/// logging. The error itself is never altered.
#[derive(Clone, Copy)]
pub struct CaughtError<'a> {
    type_name: &'static str,
    error: &'a (dyn Error + 'static),
}

impl<'a> CaughtError<'a> {
    pub fn new<E: Error + 'static>(error: &'a E) -> Self {
        Self {
            type_name: std::any::type_name::<E>(),
            error,
        }
    }

    /// An error only known as a trait object, e.g. the content of a
    /// `Box<dyn Error>`. Its concrete type name is not available, so named
    /// matchers cannot match it; typed matchers still can.
    pub fn from_dyn(error: &'a (dyn Error + 'static)) -> Self {
        Self {
            type_name: std::any::type_name::<dyn Error>(),
            error,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn simple_type_name(&self) -> String {
        simple_type_name(self.type_name)
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn error(&self) -> &'a (dyn Error + 'static) {
        self.error
    }

    /// Whether the error's concrete type is `E`, looking through trait objects
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.error.is::<E>()
    }

    /// The error and its chain of sources, one per line
    pub fn trace(&self) -> String {
        let mut trace = format!("{}: {}", self.simple_type_name(), self.error);
        let mut source = self.error.source();
        while let Some(cause) = source {
            trace.push_str("\nCaused by: ");
            trace.push_str(&cause.to_string());
            source = cause.source();
        }
        trace
    }
}

/// Error values that only expose a `dyn Error`.
///
/// Lets the around lifecycle wrap calls failing with boxed errors, which do
/// not implement [`Error`] themselves.
pub trait AsDynError {
    fn as_dyn_error(&self) -> &(dyn Error + 'static);
}

impl AsDynError for Box<dyn Error> {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

impl AsDynError for Box<dyn Error + Send> {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

impl AsDynError for Box<dyn Error + Send + Sync> {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

impl AsDynError for Arc<dyn Error + Send + Sync> {
    fn as_dyn_error(&self) -> &(dyn Error + 'static) {
        &**self
    }
}

impl fmt::Debug for CaughtError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaughtError")
            .field("type_name", &self.type_name)
            .field("error", &self.error)
            .finish()
    }
}

/// One entry of an ignore list.
///
/// `Typed` matches exactly one Rust type. `Named` comes from configuration
/// and matches by type path, where module segments may be left out
/// (`NotFound`, `std::io::Error`).
#[derive(Clone)]
pub enum ErrorMatcher {
    Typed {
        type_id: TypeId,
        type_name: &'static str,
        is: fn(&(dyn Error + 'static)) -> bool,
    },
    Named(String),
}

impl ErrorMatcher {
    pub fn of<E: Error + 'static>() -> Self {
        ErrorMatcher::Typed {
            type_id: TypeId::of::<E>(),
            type_name: std::any::type_name::<E>(),
            is: is_error_of::<E>,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        ErrorMatcher::Named(name.into().trim().to_string())
    }

    pub fn matches(&self, error: &CaughtError<'_>) -> bool {
        match self {
            ErrorMatcher::Typed { is, .. } => is(error.error()),
            ErrorMatcher::Named(name) => type_path_matches(name, error.type_name()),
        }
    }

    /// The name as configured, for named matchers
    pub fn configured_name(&self) -> Option<&str> {
        match self {
            ErrorMatcher::Named(name) => Some(name),
            ErrorMatcher::Typed { .. } => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            ErrorMatcher::Typed { type_name, .. } => type_name,
            ErrorMatcher::Named(name) => name,
        }
    }
}

impl PartialEq for ErrorMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ErrorMatcher::Typed { type_id: a, .. }, ErrorMatcher::Typed { type_id: b, .. }) => a == b,
            (ErrorMatcher::Named(a), ErrorMatcher::Named(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for ErrorMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMatcher::Typed { type_name, .. } => f.debug_tuple("Typed").field(type_name).finish(),
            ErrorMatcher::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

impl From<String> for ErrorMatcher {
    fn from(name: String) -> Self {
        ErrorMatcher::named(name)
    }
}

impl From<&str> for ErrorMatcher {
    fn from(name: &str) -> Self {
        ErrorMatcher::named(name)
    }
}

impl Serialize for ErrorMatcher {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}

impl<'de> Deserialize<'de> for ErrorMatcher {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ErrorMatcher::named)
    }
}

fn is_error_of<E: Error + 'static>(error: &(dyn Error + 'static)) -> bool {
    error.is::<E>()
}

/// Whether any matcher in any of the lists matches `error`
pub fn is_ignored(error: &CaughtError<'_>, lists: &[&[ErrorMatcher]]) -> bool {
    lists
        .iter()
        .any(|list| list.iter().any(|matcher| matcher.matches(error)))
}
