use super::StringSupplierRegistrar;
use crate::interpolation::lookup::SupplierLookup;
use std::time::Duration;

pub const ELAPSED_KEY: &str = "elapsed";
pub const ELAPSED_TIME_LIMIT_KEY: &str = "elapsed-time-limit";

/// Measured call duration, plus the configured limit if there is one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub nanos: u64,
    pub limit: Option<Duration>,
}

impl Elapsed {
    pub fn new(nanos: u64) -> Self {
        Self { nanos, limit: None }
    }

    pub fn from_duration(duration: Duration) -> Self {
        Self::new(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub fn with_limit(mut self, limit: Duration) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.nanos)
    }

    pub fn exceeds_limit(&self) -> bool {
        self.limit.is_some_and(|limit| self.duration() > limit)
    }
}

/// Human-readable duration: `1.5ms`, `2s`, `250ns`
pub fn format_duration(duration: Duration) -> String {
    format!("{:?}", duration)
}

/// `{elapsed}` and, when a limit is set, `{elapsed-time-limit}`
#[derive(Debug, Default, Clone, Copy)]
pub struct ElapsedRegistrar;

impl StringSupplierRegistrar<Elapsed> for ElapsedRegistrar {
    fn register<'a>(&'a self, lookup: &mut SupplierLookup<'a>, source: Elapsed)
    where
        Elapsed: 'a,
    {
        lookup.add_supplier(ELAPSED_KEY, move || format_duration(source.duration()));
        if let Some(limit) = source.limit {
            lookup.add_supplier(ELAPSED_TIME_LIMIT_KEY, move || format_duration(limit));
        }
    }
}
