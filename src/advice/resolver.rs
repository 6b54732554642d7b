//! Level and template resolution against process-wide defaults

use crate::config::LoggerProperties;
use crate::core::{LevelOverride, LogLevel};
use std::sync::Arc;

/// The override unless it is [`LevelOverride::Default`]
#[inline]
pub fn resolve_level(override_level: LevelOverride, default: LogLevel) -> LogLevel {
    override_level.resolve(default)
}

/// The override unless it is empty
#[inline]
pub fn resolve_template<'a>(override_template: &'a str, default: &'a str) -> &'a str {
    if override_template.is_empty() {
        default
    } else {
        override_template
    }
}

/// A point in a call's lifecycle that has its own default level and template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Moment {
    Entering,
    Exited,
    ExitedAbnormally,
    Elapsed,
    ElapsedWarning,
}

#[derive(Debug, Clone)]
pub struct Resolver {
    properties: Arc<LoggerProperties>,
}

impl Resolver {
    pub fn new(properties: Arc<LoggerProperties>) -> Self {
        Self { properties }
    }

    pub fn default_level(&self, moment: Moment) -> LogLevel {
        let p = &self.properties;
        match moment {
            Moment::Entering => p.entering_level,
            Moment::Exited => p.exited_level,
            Moment::ExitedAbnormally => p.exited_abnormally_level,
            Moment::Elapsed => p.elapsed_level,
            Moment::ElapsedWarning => p.elapsed_warning_level,
        }
    }

    pub fn default_template(&self, moment: Moment) -> &str {
        let p = &self.properties;
        match moment {
            Moment::Entering => &p.entering_message,
            Moment::Exited => &p.exited_message,
            Moment::ExitedAbnormally => &p.exited_abnormally_message,
            Moment::Elapsed => &p.elapsed_message,
            Moment::ElapsedWarning => &p.elapsed_warning_message,
        }
    }

    pub fn level(&self, moment: Moment, override_level: LevelOverride) -> LogLevel {
        resolve_level(override_level, self.default_level(moment))
    }

    pub fn template<'a>(&'a self, moment: Moment, override_template: &'a str) -> &'a str {
        resolve_template(override_template, self.default_template(moment))
    }
}
