//! Registrars populate a [`SupplierLookup`] from one piece of execution
//! context each

pub mod elapsed;
pub mod exception;
pub mod method;
pub mod return_value;

pub use elapsed::{Elapsed, ElapsedRegistrar};
pub use exception::ExceptionRegistrar;
pub use method::MethodSignatureRegistrar;
pub use return_value::{ReturnValueInfo, ReturnValueRegistrar};

use super::lookup::SupplierLookup;

pub trait StringSupplierRegistrar<S> {
    /// Add this registrar's suppliers to `lookup`. Nothing is rendered until
    /// the lookup is queried.
    fn register<'a>(&'a self, lookup: &mut SupplierLookup<'a>, source: S)
    where
        S: 'a;
}
