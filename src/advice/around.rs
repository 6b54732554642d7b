//! Logging around a call: entry, outcome, elapsed time and limit warnings

use super::after::AbnormalExit;
use super::{AsDynError, CaughtError, ErrorMatcher, Interceptor, Invocation, Moment};
use crate::core::LevelOverride;
use crate::interpolation::lookup::SupplierLookup;
use crate::interpolation::registrar::{Elapsed, StringSupplierRegistrar};
use crate::interpolation::value::AsLogValue;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::{Duration, Instant};

/// Category of the framework's own timing for this step
pub const SELF_COST_CATEGORY: &str = module_path!();

/// Unit of [`LogAround::elapsed_time_limit`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElapsedUnit {
    Nanos,
    Micros,
    #[default]
    Millis,
    Seconds,
    Minutes,
    Hours,
}

impl ElapsedUnit {
    pub fn to_duration(self, amount: u64) -> Duration {
        match self {
            ElapsedUnit::Nanos => Duration::from_nanos(amount),
            ElapsedUnit::Micros => Duration::from_micros(amount),
            ElapsedUnit::Millis => Duration::from_millis(amount),
            ElapsedUnit::Seconds => Duration::from_secs(amount),
            ElapsedUnit::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            ElapsedUnit::Hours => Duration::from_secs(amount.saturating_mul(3600)),
        }
    }
}

/// Per-call intent for the full lifecycle.
///
/// `level` drives the entering, exited and elapsed messages; the abnormal
/// exit and the limit warning have levels of their own. A zero
/// `elapsed_time_limit` disables the warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LogAround {
    pub declaring_type: Option<String>,
    pub level: LevelOverride,
    pub entering_message: String,
    pub exited_message: String,
    pub exited_abnormally_level: LevelOverride,
    pub exited_abnormally_message: String,
    pub ignore_exceptions: Vec<ErrorMatcher>,
    pub print_stack_trace: bool,
    pub elapsed_message: String,
    pub elapsed_warning_level: LevelOverride,
    pub elapsed_warning_message: String,
    pub elapsed_time_limit: u64,
    pub elapsed_time_unit: ElapsedUnit,
}

impl Default for LogAround {
    fn default() -> Self {
        Self {
            declaring_type: None,
            level: LevelOverride::Default,
            entering_message: String::new(),
            exited_message: String::new(),
            exited_abnormally_level: LevelOverride::Default,
            exited_abnormally_message: String::new(),
            ignore_exceptions: Vec::new(),
            print_stack_trace: true,
            elapsed_message: String::new(),
            elapsed_warning_level: LevelOverride::Default,
            elapsed_warning_message: String::new(),
            elapsed_time_limit: 0,
            elapsed_time_unit: ElapsedUnit::Millis,
        }
    }
}

impl LogAround {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_declaring_type(mut self, declaring_type: impl Into<String>) -> Self {
        self.declaring_type = Some(declaring_type.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<LevelOverride>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_exited_abnormally_level(mut self, level: impl Into<LevelOverride>) -> Self {
        self.exited_abnormally_level = level.into();
        self
    }

    #[must_use]
    pub fn with_elapsed_warning_level(mut self, level: impl Into<LevelOverride>) -> Self {
        self.elapsed_warning_level = level.into();
        self
    }

    #[must_use]
    pub fn with_elapsed_time_limit(mut self, amount: u64, unit: ElapsedUnit) -> Self {
        self.elapsed_time_limit = amount;
        self.elapsed_time_unit = unit;
        self
    }

    #[must_use]
    pub fn ignore(mut self, matcher: ErrorMatcher) -> Self {
        self.ignore_exceptions.push(matcher);
        self
    }

    pub fn elapsed_limit(&self) -> Option<Duration> {
        (self.elapsed_time_limit > 0)
            .then(|| self.elapsed_time_unit.to_duration(self.elapsed_time_limit))
    }
}

impl Interceptor {
    /// Run `call` and log around it.
    ///
    /// The call runs exactly once and its outcome is returned untouched,
    /// whatever the logging configuration is.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use rust_call_logger::prelude::*;
    ///
    /// let memory = MemoryAppender::new();
    /// let logger = Logger::builder().min_level(LogLevel::Debug).appender(memory.clone()).build();
    /// let interceptor = Interceptor::builder().sink(Arc::new(logger)).build().unwrap();
    ///
    /// let method = MethodDescriptor::new("demo::Math", "parse").param("&str").returns("i32");
    /// let invocation = Invocation::new(&method, log_args!["12"]);
    /// let parsed = interceptor.on_around_invoke(&invocation, &LogAround::default(), || "12".parse::<i32>());
    ///
    /// assert_eq!(parsed, Ok(12));
    /// assert!(memory.messages().iter().any(|m| m.contains("return value [12]")));
    /// ```
    pub fn on_around_invoke<T, E, F>(
        &self,
        invocation: &Invocation<'_>,
        config: &LogAround,
        call: F,
    ) -> Result<T, E>
    where
        T: AsLogValue,
        E: Error + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        self.around(invocation, config, call, caught_typed::<E>)
    }

    /// [`on_around_invoke`](Self::on_around_invoke) for calls failing with a
    /// boxed `dyn Error`
    pub fn on_around_invoke_dyn<T, E, F>(
        &self,
        invocation: &Invocation<'_>,
        config: &LogAround,
        call: F,
    ) -> Result<T, E>
    where
        T: AsLogValue,
        E: AsDynError,
        F: FnOnce() -> Result<T, E>,
    {
        self.around(invocation, config, call, caught_dyn::<E>)
    }

    fn around<T, E, F>(
        &self,
        invocation: &Invocation<'_>,
        config: &LogAround,
        call: F,
        caught: fn(&E) -> CaughtError<'_>,
    ) -> Result<T, E>
    where
        T: AsLogValue,
        F: FnOnce() -> Result<T, E>,
    {
        if !self.properties.enabled {
            return call();
        }
        let started = Instant::now();
        let category = Self::category(invocation.method(), config.declaring_type.as_deref());
        self.log_entering(invocation, category, config.level, &config.entering_message);
        let before_call = started.elapsed();

        let call_started = Instant::now();
        let outcome = call();
        let elapsed = Elapsed::from_duration(call_started.elapsed());
        let finishing = Instant::now();

        match &outcome {
            Ok(value) => {
                if let Some(level) =
                    self.enabled_level(invocation.method(), category, Moment::Exited, config.level)
                {
                    let value = value.as_log_value();
                    self.emit_exited(invocation, category, level, &config.exited_message, &value);
                }
            }
            Err(error) => {
                let caught = caught(error);
                self.log_exited_abnormally(
                    invocation,
                    category,
                    &caught,
                    AbnormalExit {
                        level: config.exited_abnormally_level,
                        template: &config.exited_abnormally_message,
                        ignore_exceptions: &config.ignore_exceptions,
                        print_stack_trace: config.print_stack_trace,
                    },
                );
            }
        }

        let elapsed = match config.elapsed_limit() {
            Some(limit) => elapsed.with_limit(limit),
            None => elapsed,
        };
        self.log_elapsed(invocation, category, config, elapsed);
        self.log_self_cost(
            SELF_COST_CATEGORY,
            "log_around",
            before_call + finishing.elapsed(),
        );
        outcome
    }

    fn log_elapsed(
        &self,
        invocation: &Invocation<'_>,
        category: &str,
        config: &LogAround,
        elapsed: Elapsed,
    ) {
        let method = invocation.method();
        if let Some(level) = self.enabled_level(method, category, Moment::Elapsed, config.level) {
            let mut lookup = SupplierLookup::new();
            self.method_registrar.register(&mut lookup, invocation);
            self.elapsed_registrar.register(&mut lookup, elapsed);
            let message = self.render(Moment::Elapsed, &config.elapsed_message, &lookup);
            self.emit(category, level, message, None);
        }

        if !elapsed.exceeds_limit() {
            return;
        }
        if let Some(level) =
            self.enabled_level(method, category, Moment::ElapsedWarning, config.elapsed_warning_level)
        {
            let mut lookup = SupplierLookup::new();
            self.method_registrar.register(&mut lookup, invocation);
            self.elapsed_registrar.register(&mut lookup, elapsed);
            let message =
                self.render(Moment::ElapsedWarning, &config.elapsed_warning_message, &lookup);
            self.emit(category, level, message, None);
        }
    }
}

fn caught_typed<E: Error + 'static>(error: &E) -> CaughtError<'_> {
    CaughtError::new(error)
}

fn caught_dyn<E: AsDynError>(error: &E) -> CaughtError<'_> {
    CaughtError::from_dyn(error.as_dyn_error())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::MethodDescriptor;
    use crate::appenders::MemoryAppender;
    use crate::config::LoggerProperties;
    use crate::core::{LogLevel, Logger};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("payment declined")]
    struct Declined;

    fn setup(properties: LoggerProperties) -> (Interceptor, MemoryAppender) {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .min_level(LogLevel::Trace)
            .category_level(SELF_COST_CATEGORY, LogLevel::Error)
            .appender(memory.clone())
            .build();
        let interceptor = Interceptor::builder()
            .sink(Arc::new(logger))
            .properties(properties)
            .build()
            .unwrap();
        (interceptor, memory)
    }

    #[test]
    fn test_success_lifecycle() {
        let (interceptor, memory) = setup(LoggerProperties::default());
        let method = MethodDescriptor::new("shop::Payments", "charge")
            .param("u64")
            .returns("bool");
        let invocation = Invocation::new(&method, vec![100u64.as_log_value()]);

        let result: Result<bool, Declined> =
            interceptor.on_around_invoke(&invocation, &LogAround::default(), || Ok(true));

        assert_eq!(result, Ok(true));
        let messages = memory.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], "Entering [bool charge(u64)] with parameters [100]");
        assert_eq!(
            messages[1],
            "[bool charge(u64)] exited normally with return value [true]"
        );
        assert!(messages[2].starts_with("[bool charge(u64)] elapsed ["));
    }

    #[test]
    fn test_error_is_returned_unchanged() {
        let (interceptor, memory) = setup(LoggerProperties::default());
        let method = MethodDescriptor::new("shop::Payments", "charge");
        let invocation = Invocation::new(&method, vec![]);

        let result: Result<(), Declined> =
            interceptor.on_around_invoke(&invocation, &LogAround::default(), || Err(Declined));

        assert_eq!(result, Err(Declined));
        let entries = memory.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].level, LogLevel::Error);
        assert!(entries[1].message.contains("type=Declined, message=payment declined"));
        assert!(entries[2].message.contains("elapsed"));
    }

    #[test]
    fn test_per_moment_default_levels() {
        let (interceptor, memory) = setup(LoggerProperties::default());
        let method = MethodDescriptor::new("shop::Payments", "charge");
        let invocation = Invocation::new(&method, vec![]);
        let config = LogAround::new().with_elapsed_time_limit(1, ElapsedUnit::Nanos);

        let _: Result<(), Declined> = interceptor.on_around_invoke(&invocation, &config, || {
            thread::sleep(Duration::from_millis(2));
            Err(Declined)
        });

        let levels: Vec<LogLevel> = memory.entries().iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Debug, LogLevel::Error, LogLevel::Debug, LogLevel::Warn]
        );
        assert_eq!(
            memory.messages()[3],
            "[() charge()] reached elapsed time limit [1ns]"
        );
    }

    #[test]
    fn test_no_warning_under_limit() {
        let (interceptor, memory) = setup(LoggerProperties::default());
        let method = MethodDescriptor::new("shop::Payments", "charge");
        let config = LogAround::new().with_elapsed_time_limit(1, ElapsedUnit::Hours);

        let _: Result<(), Declined> =
            interceptor.on_around_invoke(&Invocation::new(&method, vec![]), &config, || Ok(()));

        assert!(memory.entries_at(LogLevel::Warn).is_empty());
    }

    #[test]
    fn test_disabled_runs_call_once_and_logs_nothing() {
        let properties = LoggerProperties {
            enabled: false,
            ..Default::default()
        };
        let (interceptor, memory) = setup(properties);
        let method = MethodDescriptor::new("shop::Payments", "charge");
        let calls = AtomicUsize::new(0);

        let result: Result<u8, Declined> = interceptor.on_around_invoke(
            &Invocation::new(&method, vec![]),
            &LogAround::default(),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(5)
            },
        );

        assert_eq!(result, Ok(5));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_ignored_error_still_logs_elapsed() {
        let (interceptor, memory) = setup(LoggerProperties::default());
        let method = MethodDescriptor::new("shop::Payments", "charge");
        let config = LogAround::new().ignore(ErrorMatcher::of::<Declined>());

        let _: Result<(), Declined> =
            interceptor.on_around_invoke(&Invocation::new(&method, vec![]), &config, || Err(Declined));

        let messages = memory.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].contains("elapsed"));
    }

    #[test]
    fn test_elapsed_unit_conversion() {
        assert_eq!(ElapsedUnit::Micros.to_duration(3), Duration::from_micros(3));
        assert_eq!(ElapsedUnit::Minutes.to_duration(2), Duration::from_secs(120));
        assert_eq!(LogAround::default().elapsed_limit(), None);
        let config: LogAround =
            serde_json::from_str(r#"{"elapsed-time-limit": 5, "elapsed-time-unit": "SECONDS"}"#)
                .unwrap();
        assert_eq!(config.elapsed_limit(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_boxed_error_is_returned_unchanged() {
        let (interceptor, memory) = setup(LoggerProperties::default());
        let method = MethodDescriptor::new("shop::Payments", "charge");
        let invocation = Invocation::new(&method, vec![]);

        let result: Result<(), Box<dyn Error + Send + Sync>> = interceptor
            .on_around_invoke_dyn(&invocation, &LogAround::default(), || {
                Err::<(), Box<dyn Error + Send + Sync>>("card expired".into())
            });

        assert_eq!(result.unwrap_err().to_string(), "card expired");
        let entries = memory.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].level, LogLevel::Error);
        assert!(entries[1]
            .message
            .contains("type=dyn Error, message=card expired"));
    }

    #[test]
    fn test_ignore_list_sees_through_boxed_error() {
        let (interceptor, memory) = setup(LoggerProperties::default());
        let method = MethodDescriptor::new("shop::Payments", "charge");
        let config = LogAround::new().ignore(ErrorMatcher::of::<Declined>());

        let result: Result<(), Box<dyn Error>> = interceptor.on_around_invoke_dyn(
            &Invocation::new(&method, vec![]),
            &config,
            || Err(Box::new(Declined) as Box<dyn Error>),
        );

        assert!(result.unwrap_err().is::<Declined>());
        assert!(memory.entries_at(LogLevel::Error).is_empty());
        assert_eq!(memory.entries().len(), 2);
    }
}
