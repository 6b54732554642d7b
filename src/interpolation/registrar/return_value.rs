use super::StringSupplierRegistrar;
use crate::advice::context::MethodDescriptor;
use crate::interpolation::converter::ConverterChain;
use crate::interpolation::lookup::SupplierLookup;
use crate::interpolation::value::LogValue;
use std::sync::Arc;

pub const RETURN_VALUE_KEY: &str = "return-value";

const NO_RETURN_VALUE: &str = "none";
const NULL_RETURN_VALUE: &str = "null";

/// A completed call's method and the value it returned
#[derive(Debug, Clone, Copy)]
pub struct ReturnValueInfo<'a> {
    pub method: &'a MethodDescriptor,
    pub value: &'a LogValue,
}

impl<'a> ReturnValueInfo<'a> {
    pub fn new(method: &'a MethodDescriptor, value: &'a LogValue) -> Self {
        Self { method, value }
    }
}

/// `{return-value}`: `none` for void methods, whatever they returned
pub struct ReturnValueRegistrar {
    chain: Arc<ConverterChain>,
}

impl ReturnValueRegistrar {
    pub fn new(chain: Arc<ConverterChain>) -> Self {
        Self { chain }
    }

    pub fn render(&self, info: ReturnValueInfo<'_>) -> String {
        if info.method.is_void() {
            return NO_RETURN_VALUE.to_string();
        }
        if info.value.is_null() {
            return NULL_RETURN_VALUE.to_string();
        }
        self.chain.render(info.value)
    }
}

impl<'r> StringSupplierRegistrar<ReturnValueInfo<'r>> for ReturnValueRegistrar {
    fn register<'a>(&'a self, lookup: &mut SupplierLookup<'a>, source: ReturnValueInfo<'r>)
    where
        ReturnValueInfo<'r>: 'a,
    {
        lookup.add_supplier(RETURN_VALUE_KEY, move || self.render(source));
    }
}
