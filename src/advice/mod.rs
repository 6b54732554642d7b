//! Interception lifecycles
//!
//! An external interception mechanism reports calls to an [`Interceptor`]
//! through one of four entry points:
//!
//! - [`Interceptor::on_entry`] for [`LogBefore`]
//! - [`Interceptor::on_normal_return`] and [`Interceptor::on_error`] for [`LogAfter`]
//! - [`Interceptor::on_around_invoke`] for [`LogAround`], which also runs the call
//!
//! Logging never changes the outcome of the intercepted call.

pub mod after;
pub mod around;
pub mod before;
pub mod context;
pub mod resolver;

pub use after::LogAfter;
pub use around::{ElapsedUnit, LogAround};
pub use before::LogBefore;
pub use context::{AsDynError, CaughtError, ErrorMatcher, Invocation, MethodDescriptor, ParameterDescriptor};
pub use resolver::{resolve_level, resolve_template, Moment, Resolver};

use crate::config::LoggerProperties;
use crate::core::{LevelOverride, LogEntry, LogLevel, LogSink, LoggerError, Result};
use crate::interpolation::converter::{ConverterChain, ConverterChainBuilder, ToStringConverter};
use crate::interpolation::lookup::SupplierLookup;
use crate::interpolation::registrar::elapsed::format_duration;
use crate::interpolation::registrar::{
    ElapsedRegistrar, ExceptionRegistrar, MethodSignatureRegistrar, ReturnValueRegistrar,
};
use crate::interpolation::substitutor::StringSubstitutor;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Turns intercepted calls into log messages.
///
/// Built once at startup and shared; every call gets its own lookups.
pub struct Interceptor {
    properties: Arc<LoggerProperties>,
    resolver: Resolver,
    substitutor: StringSubstitutor,
    chain: Arc<ConverterChain>,
    method_registrar: MethodSignatureRegistrar,
    return_value_registrar: ReturnValueRegistrar,
    exception_registrar: ExceptionRegistrar,
    elapsed_registrar: ElapsedRegistrar,
    sink: Arc<dyn LogSink>,
}

impl Interceptor {
    pub fn builder() -> InterceptorBuilder {
        InterceptorBuilder::new()
    }

    pub fn properties(&self) -> &LoggerProperties {
        &self.properties
    }

    pub fn converter_chain(&self) -> &ConverterChain {
        &self.chain
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    fn category<'a>(method: &'a MethodDescriptor, declaring_type: Option<&'a str>) -> &'a str {
        declaring_type.unwrap_or_else(|| method.declaring_type())
    }

    /// The resolved level for `moment`, if a message should be produced
    fn enabled_level(
        &self,
        method: &MethodDescriptor,
        category: &str,
        moment: Moment,
        override_level: LevelOverride,
    ) -> Option<LogLevel> {
        if method.is_do_not_log() {
            return None;
        }
        let level = self.resolver.level(moment, override_level);
        self.sink.is_enabled(category, level).then_some(level)
    }

    fn render(&self, moment: Moment, template_override: &str, lookup: &SupplierLookup<'_>) -> String {
        self.substitutor
            .substitute(self.resolver.template(moment, template_override), lookup)
    }

    fn emit(&self, category: &str, level: LogLevel, message: String, trace: Option<String>) {
        let mut entry = LogEntry::new(level, category, message);
        if let Some(trace) = trace {
            entry = entry.with_error_trace(trace);
        }
        self.sink.emit(entry);
    }

    /// The framework's own overhead for one lifecycle step
    fn log_self_cost(&self, category: &str, step: &str, cost: Duration) {
        if self.sink.is_enabled(category, LogLevel::Debug) {
            self.emit(
                category,
                LogLevel::Debug,
                format!("[{}] elapsed [{}]", step, format_duration(cost)),
                None,
            );
        }
    }
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("properties", &self.properties)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Interceptor`]
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rust_call_logger::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(memory.clone())
///     .build();
///
/// let interceptor = Interceptor::builder()
///     .sink(Arc::new(logger))
///     .build()
///     .unwrap();
///
/// let method = MethodDescriptor::new("demo::Greeter", "greet").param("&str");
/// interceptor.on_entry(&Invocation::new(&method, log_args!["world"]), &LogBefore::default());
///
/// assert_eq!(memory.messages()[0], "Entering [() greet(&str)] with parameters [world]");
/// ```
pub struct InterceptorBuilder {
    properties: LoggerProperties,
    sink: Option<Arc<dyn LogSink>>,
    converters: Vec<Arc<dyn ToStringConverter>>,
}

impl InterceptorBuilder {
    pub fn new() -> Self {
        Self {
            properties: LoggerProperties::default(),
            sink: None,
            converters: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn properties(mut self, properties: LoggerProperties) -> Self {
        self.properties = properties;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Register a converter consulted after the built-in ones
    #[must_use = "builder methods return a new value"]
    pub fn converter<C: ToStringConverter + 'static>(mut self, converter: C) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    /// Validates the properties; any configuration problem is fatal here
    pub fn build(self) -> Result<Interceptor> {
        self.properties.validate()?;
        let sink = self
            .sink
            .ok_or_else(|| LoggerError::config("interceptor", "no log sink configured"))?;

        let mut chain_builder = ConverterChainBuilder::new(self.properties.reflection_to_string.clone());
        for converter in self.converters {
            chain_builder = chain_builder.shared_converter(converter);
        }
        let chain = Arc::new(chain_builder.build()?);

        let global_excludes = self.properties.reflection_to_string.effective_exclude_field_names();
        let properties = Arc::new(self.properties);

        Ok(Interceptor {
            resolver: Resolver::new(properties.clone()),
            substitutor: StringSubstitutor::new(),
            method_registrar: MethodSignatureRegistrar::new(chain.clone(), global_excludes),
            return_value_registrar: ReturnValueRegistrar::new(chain.clone()),
            exception_registrar: ExceptionRegistrar,
            elapsed_registrar: ElapsedRegistrar,
            chain,
            properties,
            sink,
        })
    }
}

impl Default for InterceptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
