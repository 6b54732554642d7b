use super::StringSupplierRegistrar;
use crate::advice::context::CaughtError;
use crate::interpolation::lookup::SupplierLookup;

pub const EXCEPTION_KEY: &str = "exception";

/// `{exception}` as `type=<simple type name>, message=<message>`
#[derive(Debug, Default, Clone, Copy)]
pub struct ExceptionRegistrar;

impl ExceptionRegistrar {
    pub fn render(&self, error: &CaughtError<'_>) -> String {
        format!("type={}, message={}", error.simple_type_name(), error.message())
    }
}

impl<'e, 'c> StringSupplierRegistrar<&'e CaughtError<'c>> for ExceptionRegistrar {
    fn register<'a>(&'a self, lookup: &mut SupplierLookup<'a>, source: &'e CaughtError<'c>)
    where
        &'e CaughtError<'c>: 'a,
    {
        lookup.add_supplier(EXCEPTION_KEY, move || self.render(source));
    }
}
