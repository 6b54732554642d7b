//! Logging before a call starts

use super::{Interceptor, Invocation, Moment};
use crate::core::LevelOverride;
use crate::interpolation::lookup::SupplierLookup;
use crate::interpolation::registrar::StringSupplierRegistrar;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Category of the framework's own timing for this step
pub const SELF_COST_CATEGORY: &str = module_path!();

/// Per-call intent: log the entering message. Empty or `Default` fields
/// inherit the process-wide defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LogBefore {
    /// Category to log under instead of the method's declaring type
    pub declaring_type: Option<String>,
    pub level: LevelOverride,
    pub entering_message: String,
}

impl LogBefore {
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
    pub fn with_entering_message(mut self, template: impl Into<String>) -> Self {
        self.entering_message = template.into();
        self
    }
}

impl Interceptor {
    /// Called before the intercepted method runs
    pub fn on_entry(&self, invocation: &Invocation<'_>, config: &LogBefore) {
        if !self.properties.enabled {
            return;
        }
        let started = Instant::now();
        let category = Self::category(invocation.method(), config.declaring_type.as_deref());
        self.log_entering(invocation, category, config.level, &config.entering_message);
        self.log_self_cost(SELF_COST_CATEGORY, "log_before", started.elapsed());
    }

    pub(super) fn log_entering(
        &self,
        invocation: &Invocation<'_>,
        category: &str,
        level: LevelOverride,
        template: &str,
    ) {
        let Some(level) = self.enabled_level(invocation.method(), category, Moment::Entering, level)
        else {
            return;
        };
        let mut lookup = SupplierLookup::new();
        self.method_registrar.register(&mut lookup, invocation);
        let message = self.render(Moment::Entering, template, &lookup);
        self.emit(category, level, message, None);
    }
}
