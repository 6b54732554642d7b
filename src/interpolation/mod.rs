//! Template interpolation
//!
//! Templates contain `{name}` tokens. Registrars fill a [`SupplierLookup`]
//! with lazily evaluated values drawn from the call being logged, the
//! [`StringSubstitutor`] replaces the tokens, and the [`ConverterChain`]
//! decides how runtime values turn into text.

pub mod converter;
pub mod lookup;
pub mod redaction;
pub mod registrar;
pub mod substitutor;
pub mod type_name;
pub mod value;

pub use converter::{ConverterChain, ConverterChainBuilder, ToStringConverter};
pub use lookup::{StringLookup, SupplierLookup};
pub use redaction::{Redaction, REDACTION_MARKER};
pub use registrar::{
    Elapsed, ElapsedRegistrar, ExceptionRegistrar, MethodSignatureRegistrar, ReturnValueInfo,
    ReturnValueRegistrar, StringSupplierRegistrar,
};
pub use substitutor::StringSubstitutor;
pub use value::{AsLogValue, LogValue, Loggable};
