//! Logging once a call has finished, normally or with an error

use super::context::is_ignored;
use super::{CaughtError, ErrorMatcher, Interceptor, Invocation, Moment};
use crate::core::{LevelOverride, LogLevel};
use crate::interpolation::lookup::SupplierLookup;
use crate::interpolation::registrar::{ReturnValueInfo, StringSupplierRegistrar};
use crate::interpolation::value::LogValue;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Category of the framework's own timing for this step
pub const SELF_COST_CATEGORY: &str = module_path!();

/// Per-call intent: log how the call ended.
///
/// `level` applies to both the exited and the exited-abnormally message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LogAfter {
    pub declaring_type: Option<String>,
    pub level: LevelOverride,
    pub exited_message: String,
    pub exited_abnormally_message: String,
    /// Checked in addition to the process-wide ignore list
    pub ignore_exceptions: Vec<ErrorMatcher>,
    pub print_stack_trace: bool,
}

impl Default for LogAfter {
    fn default() -> Self {
        Self {
            declaring_type: None,
            level: LevelOverride::Default,
            exited_message: String::new(),
            exited_abnormally_message: String::new(),
            ignore_exceptions: Vec::new(),
            print_stack_trace: true,
        }
    }
}

impl LogAfter {
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
    pub fn with_exited_message(mut self, template: impl Into<String>) -> Self {
        self.exited_message = template.into();
        self
    }

    #[must_use]
    pub fn with_exited_abnormally_message(mut self, template: impl Into<String>) -> Self {
        self.exited_abnormally_message = template.into();
        self
    }

    #[must_use]
    pub fn ignore(mut self, matcher: ErrorMatcher) -> Self {
        self.ignore_exceptions.push(matcher);
        self
    }

    #[must_use]
    pub fn without_stack_trace(mut self) -> Self {
        self.print_stack_trace = false;
        self
    }
}

/// How to report an error that ended a call
pub(super) struct AbnormalExit<'c> {
    pub level: LevelOverride,
    pub template: &'c str,
    pub ignore_exceptions: &'c [ErrorMatcher],
    pub print_stack_trace: bool,
}

impl Interceptor {
    /// Called after the intercepted method returned `value`
    pub fn on_normal_return(&self, invocation: &Invocation<'_>, config: &LogAfter, value: &LogValue) {
        if !self.properties.enabled {
            return;
        }
        let started = Instant::now();
        let category = Self::category(invocation.method(), config.declaring_type.as_deref());
        if let Some(level) =
            self.enabled_level(invocation.method(), category, Moment::Exited, config.level)
        {
            self.emit_exited(invocation, category, level, &config.exited_message, value);
        }
        self.log_self_cost(SELF_COST_CATEGORY, "log_after", started.elapsed());
    }

    /// Called after the intercepted method failed with `error`
    pub fn on_error(&self, invocation: &Invocation<'_>, config: &LogAfter, error: &CaughtError<'_>) {
        if !self.properties.enabled {
            return;
        }
        let started = Instant::now();
        let category = Self::category(invocation.method(), config.declaring_type.as_deref());
        self.log_exited_abnormally(
            invocation,
            category,
            error,
            AbnormalExit {
                level: config.level,
                template: &config.exited_abnormally_message,
                ignore_exceptions: &config.ignore_exceptions,
                print_stack_trace: config.print_stack_trace,
            },
        );
        self.log_self_cost(SELF_COST_CATEGORY, "log_after", started.elapsed());
    }

    pub(super) fn emit_exited(
        &self,
        invocation: &Invocation<'_>,
        category: &str,
        level: LogLevel,
        template: &str,
        value: &LogValue,
    ) {
        let mut lookup = SupplierLookup::new();
        self.method_registrar.register(&mut lookup, invocation);
        self.return_value_registrar
            .register(&mut lookup, ReturnValueInfo::new(invocation.method(), value));
        let message = self.render(Moment::Exited, template, &lookup);
        self.emit(category, level, message, None);
    }

    pub(super) fn log_exited_abnormally(
        &self,
        invocation: &Invocation<'_>,
        category: &str,
        error: &CaughtError<'_>,
        exit: AbnormalExit<'_>,
    ) {
        let Some(level) =
            self.enabled_level(invocation.method(), category, Moment::ExitedAbnormally, exit.level)
        else {
            return;
        };
        if is_ignored(
            error,
            &[exit.ignore_exceptions, self.properties.ignore_exceptions.as_slice()],
        ) {
            return;
        }

        let mut lookup = SupplierLookup::new();
        self.method_registrar.register(&mut lookup, invocation);
        self.exception_registrar.register(&mut lookup, error);
        let message = self.render(Moment::ExitedAbnormally, exit.template, &lookup);
        let trace = exit.print_stack_trace.then(|| error.trace());
        self.emit(category, level, message, trace);
    }
}
